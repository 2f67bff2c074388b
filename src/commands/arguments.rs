/// Whitespace separated `<subcommand> [username]`, further fields are ignored.
#[derive(Debug, Default, PartialEq)]
pub struct CommandArguments<'a> {
    pub subcommand: Option<&'a str>,
    pub username: Option<&'a str>,
}

impl<'a> CommandArguments<'a> {
    pub fn parse(args: &'a str) -> CommandArguments<'a> {
        let mut fields = args.split_whitespace();

        CommandArguments {
            subcommand: fields.next(),
            username: fields.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::CommandArguments;

    #[test]
    fn empty() {
        assert_eq!(CommandArguments::parse(""), CommandArguments::default());
        assert_eq!(CommandArguments::parse("   \t "), CommandArguments::default());
    }

    #[test]
    fn subcommand_only() {
        assert_eq!(
            CommandArguments::parse("recent"),
            CommandArguments {
                subcommand: Some("recent"),
                username: None,
            }
        );
    }

    #[test]
    fn subcommand_and_username() {
        assert_eq!(
            CommandArguments::parse("  a   gaben "),
            CommandArguments {
                subcommand: Some("a"),
                username: Some("gaben"),
            }
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        assert_eq!(
            CommandArguments::parse("s gaben robin"),
            CommandArguments {
                subcommand: Some("s"),
                username: Some("gaben"),
            }
        );
    }
}
