use basket_core::{LineId, ProductId};

pub const HELP: &str = "\
Commands:
  load            reload the product catalog
  catalog         open the product list
  add <id>...     add products by catalog id (closes the product list)
  item <line>     show details of a basket line
  back            close the open sheet without adding
  clear           clear the basket (asks for confirmation)
  yes | no        answer the clear confirmation
  show            print the basket
  help            print this help
  quit            exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Load,
    Catalog,
    Add(Vec<ProductId>),
    Item(LineId),
    Back,
    Clear,
    Confirm,
    Cancel,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
}

pub fn parse_command(line: &str) -> Result<UserCommand, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "load" | "reload" => UserCommand::Load,
        "catalog" | "products" => UserCommand::Catalog,
        "add" => {
            let ids = words.map(parse_number).collect::<Result<Vec<_>, _>>()?;
            if ids.is_empty() {
                return Err(CommandError::MissingArgument("add"));
            }
            UserCommand::Add(ids)
        }
        "item" => {
            let line_id = words
                .next()
                .ok_or(CommandError::MissingArgument("item"))
                .and_then(parse_number)?;
            UserCommand::Item(line_id)
        }
        "back" => UserCommand::Back,
        "clear" => UserCommand::Clear,
        "yes" | "y" => UserCommand::Confirm,
        "no" | "n" => UserCommand::Cancel,
        "show" | "ls" => UserCommand::Show,
        "help" | "?" => UserCommand::Help,
        "quit" | "exit" | "q" => UserCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_number(word: &str) -> Result<u64, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}
