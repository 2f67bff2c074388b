use crate::{
    steam::{SteamClient, SteamError},
    utils::formatting::colour_tag,
};

use super::{lookup_recently_played, no_id_found};

/// Lists the recently played games of `username`.
#[tracing::instrument(skip(steam))]
pub async fn last_game(steam: &SteamClient, username: &str) -> Result<String, SteamError> {
    let Some((_, games)) = lookup_recently_played(steam, username).await? else {
        return Ok(no_id_found(username));
    };

    if games.is_empty() {
        return Ok(format!("{username} has no recently played steam games"));
    }

    let names = colour_tag(&games.names());

    Ok(format!(
        "{username}'s recently played steam games: {}",
        names.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use map_macro::hash_map;

    use crate::steam::{
        testing::{
            client, recently_played_body, recently_played_url, resolve_url, FakeTransport,
            ID_FOUND, ID_NOT_FOUND,
        },
        SteamError,
    };

    use super::last_game;

    #[test(tokio::test)]
    async fn resolve_returns_empty_body() {
        let fake = FakeTransport::empty();

        let err = last_game(&client(fake), "id").await.unwrap_err();

        assert!(matches!(err, SteamError::Decode(_)));
        assert!(err.to_string().starts_with("EOF while parsing"), "{err}");
    }

    #[test(tokio::test)]
    async fn id_not_found() {
        let fake = FakeTransport::new(hash_map! {
            resolve_url("id") => ID_NOT_FOUND.to_string(),
        });

        let reply = last_game(&client(fake.clone()), "id").await.unwrap();

        assert_eq!(reply, "Error: no id found for id");
        assert_eq!(fake.requests(), vec![resolve_url("id")]);
    }

    #[test(tokio::test)]
    async fn recently_played_returns_empty_body() {
        let fake = FakeTransport::new(hash_map! {
            resolve_url("id") => ID_FOUND.to_string(),
        });

        let err = last_game(&client(fake), "id").await.unwrap_err();

        assert!(matches!(err, SteamError::Decode(_)));
    }

    #[test(tokio::test)]
    async fn resolve_is_unreachable() {
        let fake = FakeTransport::unreachable(Default::default(), &[resolve_url("id")]);

        let err = last_game(&client(fake.clone()), "id").await.unwrap_err();

        assert!(matches!(err, SteamError::Transport(_)));
        assert_eq!(fake.requests(), vec![resolve_url("id")]);
    }

    #[test(tokio::test)]
    async fn recently_played_is_unreachable() {
        let fake = FakeTransport::unreachable(
            hash_map! {
                resolve_url("id") => ID_FOUND.to_string(),
            },
            &[recently_played_url("999")],
        );

        let err = last_game(&client(fake), "id").await.unwrap_err();

        assert!(matches!(err, SteamError::Transport(_)));
    }

    #[test(tokio::test)]
    async fn no_games() {
        let fake = FakeTransport::new(hash_map! {
            resolve_url("id") => ID_FOUND.to_string(),
            recently_played_url("999") => r#"{"response":{}}"#.to_string(),
        });

        let reply = last_game(&client(fake), "id").await.unwrap();

        assert_eq!(reply, "id has no recently played steam games");
    }

    #[test(tokio::test)]
    async fn three_games() {
        let fake = FakeTransport::new(hash_map! {
            resolve_url("id") => ID_FOUND.to_string(),
            recently_played_url("999") => recently_played_body(&[(1, "A"), (2, "B"), (3, "C")]),
        });

        let reply = last_game(&client(fake.clone()), "id").await.unwrap();

        assert_eq!(
            reply,
            "id's recently played steam games: {green}A{clear}, {red}B{clear}, {blue}C{clear}"
        );
        assert_eq!(
            fake.requests(),
            vec![resolve_url("id"), recently_played_url("999")]
        );
    }
}
