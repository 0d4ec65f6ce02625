//! Command-line parsing.

use anyhow::{Context, Result, anyhow, bail};
use libris_core::{AuthorId, BookId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    Register {
        email: String,
        username: String,
        password: String,
        confirm: String,
        display_name: String,
    },
    Logout,
    Whoami,
    Authors,
    Author(AuthorId),
    Books,
    Book(BookId),
    DeleteAuthor(AuthorId),
    DeleteBook(BookId),
    Help,
}

pub fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <command> [args]\n\nCommands:\n  login <email> <password>                              sign in and store the session\n  register <email> <username> <password> <confirm> [display name]\n  logout                                                forget the stored session\n  whoami                                                show the signed-in user\n  authors | books                                       list records\n  author <id> | book <id>                               show one record\n  delete-author <id> | delete-book <id>                 delete after confirmation (admin)\n  help                                                  show this help\n\nEnvironment:\n  LIBRIS_API_URL       API base URL (default https://localhost:7285/api)\n  LIBRIS_CREDENTIALS   credential file (default: <data dir>/libris/credentials.json)\n  RUST_LOG             log filter (default info)\n  LIBRIS_LOG_FORMAT    set to json for JSON logs"
    );
}

pub fn parse(args: &[String]) -> Result<Command> {
    let Some((cmd, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    let arg = |i: usize, name: &str| -> Result<String> {
        rest.get(i)
            .cloned()
            .ok_or_else(|| anyhow!("`{cmd}` expects <{name}>"))
    };

    let command = match cmd.as_str() {
        "login" => Command::Login {
            email: arg(0, "email")?,
            password: arg(1, "password")?,
        },
        "register" => Command::Register {
            email: arg(0, "email")?,
            username: arg(1, "username")?,
            password: arg(2, "password")?,
            confirm: arg(3, "confirm")?,
            display_name: rest.get(4..).map(|words| words.join(" ")).unwrap_or_default(),
        },
        "logout" => Command::Logout,
        "whoami" => Command::Whoami,
        "authors" => Command::Authors,
        "books" => Command::Books,
        "author" => Command::Author(parse_id(&arg(0, "id")?)?),
        "book" => Command::Book(parse_id(&arg(0, "id")?)?),
        "delete-author" => Command::DeleteAuthor(parse_id(&arg(0, "id")?)?),
        "delete-book" => Command::DeleteBook(parse_id(&arg(0, "id")?)?),
        "help" | "-h" | "--help" => Command::Help,
        other => bail!("unknown command `{other}`"),
    };
    Ok(command)
}

fn parse_id<T>(raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse().with_context(|| format!("invalid id `{raw}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn empty_means_help() {
        assert_eq!(parse(&[]).unwrap(), Command::Help);
    }

    #[test]
    fn register_joins_the_display_name() {
        let cmd = parse(&argv("register ann@example.com ann pw pw Ann Lee")).unwrap();
        assert_eq!(
            cmd,
            Command::Register {
                email: "ann@example.com".into(),
                username: "ann".into(),
                password: "pw".into(),
                confirm: "pw".into(),
                display_name: "Ann Lee".into(),
            }
        );
    }

    #[test]
    fn ids_are_checked() {
        let id = "3f2504e0-4f89-11d3-9a0c-0305e82c3301";
        assert_eq!(
            parse(&argv(&format!("delete-book {id}"))).unwrap(),
            Command::DeleteBook(id.parse().unwrap())
        );
        assert!(parse(&argv("author nope")).is_err());
    }

    #[test]
    fn missing_arguments_are_named() {
        let err = parse(&argv("login alice@example.com")).unwrap_err();
        assert_eq!(err.to_string(), "`login` expects <password>");
    }

    #[test]
    fn unknown_commands_are_rejected() {
        assert!(parse(&argv("frobnicate")).is_err());
    }
}
