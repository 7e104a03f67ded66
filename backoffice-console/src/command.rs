//! Console command language.

use anyhow::{bail, Result};
use backoffice_model::RecordId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCommand {
    Open,
    Set { key: String, value: String },
    Apply,
    Reset,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    Profile { first_name: String, last_name: String, email: String },
    /// Route name: `dashboard`, `profile` or a page key.
    Open(String),
    /// Dashboard tile by position.
    Tile(usize),
    List,
    Search(String),
    Page(usize),
    Next,
    Previous,
    Add,
    Edit(RecordId),
    Delete(RecordId),
    View(RecordId),
    /// Row menu entry by position.
    Action { row: RecordId, index: usize },
    Set { key: String, value: String },
    Submit,
    Confirm,
    Cancel,
    Filter(FilterCommand),
}

pub const HELP: &str = "\
commands:
  login <email> <password>     sign in
  logout | whoami
  profile <first> <last> <email>
  open <dashboard|profile|page> switch screen
  tile <n>                     follow a dashboard tile
  list                         redraw the current page
  search [term]                search (empty clears)
  page <n> | next | prev
  add | edit <id> | delete <id> | view <id>
  action <id> <n>              pick entry n of a row menu
  set <field> <value>          fill the open form
  submit | confirm | cancel
  filter [set <field> <value> | apply | reset | close]
  help | quit";

fn id_arg(rest: &str, command: &str) -> Result<RecordId> {
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("usage: {command} <id>");
    }
    Ok(RecordId::parse(rest))
}

fn number_arg(rest: &str, command: &str) -> Result<usize> {
    rest.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("usage: {command} <number>"))
}

/// Splits `key value...` into the key and the (possibly empty) rest.
fn key_value(rest: &str, usage: &str) -> Result<(String, String)> {
    let rest = rest.trim();
    if rest.is_empty() {
        bail!("usage: {usage}");
    }
    let (key, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Ok((key.to_string(), value.trim().to_string()))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let command = match word.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "login" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(email), Some(password)) => Self::Login {
                        email: email.to_string(),
                        password: password.to_string(),
                    },
                    _ => bail!("usage: login <email> <password>"),
                }
            }
            "logout" => Self::Logout,
            "whoami" => Self::WhoAmI,
            "profile" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                let [first, last, email] = parts.as_slice() else {
                    bail!("usage: profile <first> <last> <email>");
                };
                Self::Profile {
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    email: email.to_string(),
                }
            }
            "open" | "go" => {
                let route = rest.trim();
                if route.is_empty() {
                    bail!("usage: open <route>");
                }
                Self::Open(route.to_lowercase())
            }
            "tile" => Self::Tile(number_arg(rest, "tile")?),
            "list" | "ls" => Self::List,
            "search" => Self::Search(rest.trim().to_string()),
            "page" => Self::Page(number_arg(rest, "page")?),
            "next" => Self::Next,
            "prev" | "previous" => Self::Previous,
            "add" | "new" => Self::Add,
            "edit" => Self::Edit(id_arg(rest, "edit")?),
            "delete" | "rm" => Self::Delete(id_arg(rest, "delete")?),
            "view" => Self::View(id_arg(rest, "view")?),
            "action" => {
                let (row, index) = key_value(rest, "action <id> <n>")?;
                Self::Action {
                    row: RecordId::parse(&row),
                    index: number_arg(&index, "action <id>")?,
                }
            }
            "set" => {
                let (key, value) = key_value(rest, "set <field> <value>")?;
                Self::Set { key, value }
            }
            "submit" | "save" => Self::Submit,
            "confirm" => Self::Confirm,
            "cancel" | "close" => Self::Cancel,
            "filter" | "filters" => {
                let (sub, args) = rest.trim().split_once(char::is_whitespace).unwrap_or((rest.trim(), ""));
                Self::Filter(match sub {
                    "" | "open" => FilterCommand::Open,
                    "set" => {
                        let (key, value) = key_value(args, "filter set <field> <value>")?;
                        FilterCommand::Set { key, value }
                    }
                    "apply" => FilterCommand::Apply,
                    "reset" => FilterCommand::Reset,
                    "close" => FilterCommand::Close,
                    other => bail!("unknown filter command `{other}`"),
                })
            }
            "" => bail!("empty command"),
            other => bail!("unknown command `{other}`, try `help`"),
        };
        Ok(command)
    }
}
