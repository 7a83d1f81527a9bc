//! Command parsing
//!
//! Turns a tokenized line into a typed [`Command`]. Parsing covers the
//! structural rules (argument counts, option syntax) and every field
//! validator, so a parsed command only still needs authorization and the
//! checks against stored records.

pub mod options;
pub mod tokenizer;

pub use options::{parse_field_options, BookField, FieldOption};
pub use tokenizer::tokenize;

use crate::error::{BookstoreError, BookstoreResult};
use crate::models::{BookUpdate, KeywordList, Money, Privilege};
use crate::storage::BookFilter;
use crate::validation;

const MODIFY_FIELDS: &[BookField] = &[
    BookField::Isbn,
    BookField::Name,
    BookField::Author,
    BookField::Keyword,
    BookField::Price,
];

const SHOW_FIELDS: &[BookField] = &[
    BookField::Isbn,
    BookField::Name,
    BookField::Author,
    BookField::Keyword,
];

/// A fully parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `quit` / `exit`
    Quit,
    /// `su <user> [password]`
    Login {
        user_id: String,
        password: Option<String>,
    },
    /// `logout`
    Logout,
    /// `register <user> <password> <display name>`
    Register {
        user_id: String,
        password: String,
        display_name: String,
    },
    /// `passwd <user> [current] <new>`
    ChangePassword {
        user_id: String,
        current: Option<String>,
        new_password: String,
    },
    /// `useradd <user> <password> <privilege> <display name>`
    CreateAccount {
        user_id: String,
        password: String,
        privilege: Privilege,
        display_name: String,
    },
    /// `delete <user>`
    DeleteAccount { user_id: String },
    /// `show [-key=value]`
    ShowBooks { filter: Option<BookFilter> },
    /// `show finance [count]`
    ShowFinance { count: Option<usize> },
    /// `buy <isbn> <quantity>`
    Buy { isbn: String, quantity: u64 },
    /// `select <isbn>`
    Select { isbn: String },
    /// `modify -key=value ...`
    Modify { update: BookUpdate },
    /// `import <quantity> <total cost>`
    Import { quantity: u64, cost: Money },
    /// `log`
    Log,
    /// `report finance`
    ReportFinance,
    /// `report employee`
    ReportEmployee,
}

impl Command {
    /// The command word, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Login { .. } => "su",
            Self::Logout => "logout",
            Self::Register { .. } => "register",
            Self::ChangePassword { .. } => "passwd",
            Self::CreateAccount { .. } => "useradd",
            Self::DeleteAccount { .. } => "delete",
            Self::ShowBooks { .. } => "show",
            Self::ShowFinance { .. } => "show finance",
            Self::Buy { .. } => "buy",
            Self::Select { .. } => "select",
            Self::Modify { .. } => "modify",
            Self::Import { .. } => "import",
            Self::Log => "log",
            Self::ReportFinance => "report finance",
            Self::ReportEmployee => "report employee",
        }
    }

    /// Parse a non-empty token list
    pub fn parse(tokens: &[String]) -> BookstoreResult<Self> {
        let Some((head, args)) = tokens.split_first() else {
            return Err(BookstoreError::syntax("empty command"));
        };

        match head.as_str() {
            "quit" | "exit" => Ok(Self::Quit),
            "su" => parse_login(args),
            "logout" => {
                expect_args(head, args, 0)?;
                Ok(Self::Logout)
            }
            "register" => parse_register(args),
            "passwd" => parse_change_password(args),
            "useradd" => parse_create_account(args),
            "delete" => {
                expect_args(head, args, 1)?;
                validation::user_token("user id", &args[0])?;
                Ok(Self::DeleteAccount {
                    user_id: args[0].clone(),
                })
            }
            "show" => parse_show(args),
            "buy" => {
                expect_args(head, args, 2)?;
                validation::isbn(&args[0])?;
                Ok(Self::Buy {
                    isbn: args[0].clone(),
                    quantity: positive_integer("quantity", &args[1])?,
                })
            }
            "select" => {
                expect_args(head, args, 1)?;
                validation::isbn(&args[0])?;
                Ok(Self::Select {
                    isbn: args[0].clone(),
                })
            }
            "modify" => parse_modify(args),
            "import" => {
                expect_args(head, args, 2)?;
                let quantity = positive_integer("quantity", &args[0])?;
                let cost = validation::currency(&args[1])?;
                if !cost.is_positive() {
                    return Err(BookstoreError::syntax("import cost must be positive"));
                }
                Ok(Self::Import { quantity, cost })
            }
            "log" => {
                expect_args(head, args, 0)?;
                Ok(Self::Log)
            }
            "report" => match args {
                [kind] if kind == "finance" => Ok(Self::ReportFinance),
                [kind] if kind == "employee" => Ok(Self::ReportEmployee),
                _ => Err(BookstoreError::syntax("expected 'report finance' or 'report employee'")),
            },
            other => Err(BookstoreError::syntax(format!("unknown command '{}'", other))),
        }
    }
}

fn expect_args(command: &str, args: &[String], count: usize) -> BookstoreResult<()> {
    if args.len() != count {
        return Err(BookstoreError::syntax(format!(
            "'{}' takes {} argument(s), got {}",
            command,
            count,
            args.len()
        )));
    }
    Ok(())
}

fn positive_integer(field: &'static str, value: &str) -> BookstoreResult<u64> {
    let parsed = validation::integer(field, value)?;
    if parsed == 0 {
        return Err(BookstoreError::syntax(format!("{} must be positive", field)));
    }
    Ok(parsed)
}

fn parse_login(args: &[String]) -> BookstoreResult<Command> {
    match args {
        [user_id] => {
            validation::user_token("user id", user_id)?;
            Ok(Command::Login {
                user_id: user_id.clone(),
                password: None,
            })
        }
        [user_id, password] => {
            validation::user_token("user id", user_id)?;
            validation::user_token("password", password)?;
            Ok(Command::Login {
                user_id: user_id.clone(),
                password: Some(password.clone()),
            })
        }
        _ => Err(BookstoreError::syntax("'su' takes 1 or 2 arguments")),
    }
}

fn parse_register(args: &[String]) -> BookstoreResult<Command> {
    expect_args("register", args, 3)?;
    validation::user_token("user id", &args[0])?;
    validation::user_token("password", &args[1])?;
    validation::display_name(&args[2])?;
    Ok(Command::Register {
        user_id: args[0].clone(),
        password: args[1].clone(),
        display_name: args[2].clone(),
    })
}

fn parse_change_password(args: &[String]) -> BookstoreResult<Command> {
    let (user_id, current, new_password) = match args {
        [user_id, new_password] => (user_id, None, new_password),
        [user_id, current, new_password] => {
            validation::user_token("current password", current)?;
            (user_id, Some(current.clone()), new_password)
        }
        _ => return Err(BookstoreError::syntax("'passwd' takes 2 or 3 arguments")),
    };
    validation::user_token("user id", user_id)?;
    validation::user_token("new password", new_password)?;
    Ok(Command::ChangePassword {
        user_id: user_id.clone(),
        current,
        new_password: new_password.clone(),
    })
}

fn parse_create_account(args: &[String]) -> BookstoreResult<Command> {
    expect_args("useradd", args, 4)?;
    validation::user_token("user id", &args[0])?;
    validation::user_token("password", &args[1])?;
    let privilege = Privilege::parse_assignable(&args[2])
        .ok_or_else(|| BookstoreError::syntax(format!("invalid privilege '{}'", args[2])))?;
    validation::display_name(&args[3])?;
    Ok(Command::CreateAccount {
        user_id: args[0].clone(),
        password: args[1].clone(),
        privilege,
        display_name: args[3].clone(),
    })
}

fn parse_show(args: &[String]) -> BookstoreResult<Command> {
    if args.first().map(String::as_str) == Some("finance") {
        return match &args[1..] {
            [] => Ok(Command::ShowFinance { count: None }),
            [count] => {
                let count = validation::integer("count", count)?;
                let count = usize::try_from(count)
                    .map_err(|_| BookstoreError::syntax("count out of range"))?;
                Ok(Command::ShowFinance { count: Some(count) })
            }
            _ => Err(BookstoreError::syntax("'show finance' takes at most 1 argument")),
        };
    }

    if args.len() > 1 {
        return Err(BookstoreError::syntax("'show' takes at most one filter"));
    }
    let filter = match parse_field_options(args, SHOW_FIELDS)?.pop() {
        None => None,
        Some(FieldOption { field, value }) => Some(match field {
            BookField::Isbn => {
                validation::isbn(&value)?;
                BookFilter::Isbn(value)
            }
            BookField::Name | BookField::Author => {
                validation::free_text(field.key(), &value)?;
                if field == BookField::Name {
                    BookFilter::Name(value)
                } else {
                    BookFilter::Author(value)
                }
            }
            BookField::Keyword => {
                validation::single_keyword(&value)?;
                BookFilter::Keyword(value)
            }
            BookField::Price => {
                return Err(BookstoreError::syntax("cannot filter by price"));
            }
        }),
    };
    Ok(Command::ShowBooks { filter })
}

fn parse_modify(args: &[String]) -> BookstoreResult<Command> {
    if args.is_empty() {
        return Err(BookstoreError::syntax("'modify' needs at least one option"));
    }

    let mut update = BookUpdate::default();
    for FieldOption { field, value } in parse_field_options(args, MODIFY_FIELDS)? {
        match field {
            BookField::Isbn => {
                validation::isbn(&value)?;
                update.isbn = Some(value);
            }
            BookField::Name => {
                validation::free_text("name", &value)?;
                update.name = Some(value);
            }
            BookField::Author => {
                validation::free_text("author", &value)?;
                update.author = Some(value);
            }
            BookField::Keyword => {
                let segments = validation::keyword_list(&value)?;
                update.keywords = Some(KeywordList::from_segments(segments));
            }
            BookField::Price => {
                update.price = Some(validation::currency(&value)?);
            }
        }
    }
    Ok(Command::Modify { update })
}
