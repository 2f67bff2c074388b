use std::fmt::Display;

use super::{Achievement, TitleAchievements};

/// The most recently unlocked achievement and the game it belongs to.
#[derive(Debug, PartialEq)]
pub struct NewestAchievement<'a> {
    pub title: &'a str,
    pub achievement: &'a Achievement,
}

impl Display for NewestAchievement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) - {}",
            self.achievement.name, self.achievement.description, self.title
        )
    }
}

/// Picks the achievement with the greatest unlock time across all titles.
///
/// Locked achievements are never picked. On equal unlock times the first one
/// seen wins, so earlier titles take precedence.
pub fn select_newest(titles: &[TitleAchievements]) -> Option<NewestAchievement<'_>> {
    let mut newest: Option<NewestAchievement> = None;

    for title in titles {
        for achievement in title.achievements.iter().filter(|a| a.is_unlocked()) {
            let is_newer = newest
                .as_ref()
                .map_or(true, |n| achievement.unlock_time > n.achievement.unlock_time);

            if is_newer {
                newest = Some(NewestAchievement {
                    title: &title.game_name,
                    achievement,
                });
            }
        }
    }

    newest
}
