//! Command dispatcher and input loop
//!
//! Each input line is tokenized, parsed into a [`Command`], and routed to the
//! service that carries it out. Rejected commands leave every record and the
//! session stack untouched and print `Invalid`.

use std::io::{BufRead, Write};

use tracing::{debug, info_span, warn};

use crate::command::{tokenize, Command};
use crate::display;
use crate::error::BookstoreResult;
use crate::services::{AccountService, BookService, ReportService};
use crate::session::SessionStack;
use crate::storage::Storage;

/// The line printed for a rejected command
pub const INVALID: &str = "Invalid";

/// What a processed line asks the input loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print these lines (possibly none) and continue
    Lines(Vec<String>),
    /// Persist and stop reading input
    Quit,
}

impl Reply {
    fn silent() -> Self {
        Self::Lines(Vec::new())
    }

    fn line(line: impl Into<String>) -> Self {
        Self::Lines(vec![line.into()])
    }
}

/// The bookstore command interpreter
pub struct Interpreter {
    storage: Storage,
    sessions: SessionStack,
}

impl Interpreter {
    /// Create an interpreter over an opened record store
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            sessions: SessionStack::new(),
        }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn sessions(&self) -> &SessionStack {
        &self.sessions
    }

    /// Execute one line, returning the cause of any failure
    pub fn execute(&mut self, line: &str) -> BookstoreResult<Reply> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let tokens = tokenize(line)?;
        if tokens.is_empty() {
            return Ok(Reply::silent());
        }

        let command = Command::parse(&tokens)?;
        let span = info_span!("command", name = command.name(), depth = self.sessions.depth());
        let _guard = span.enter();

        self.dispatch(command)
    }

    /// Execute one line, rendering rejections as [`INVALID`]
    ///
    /// Only infrastructure failures are returned as errors.
    pub fn process_line(&mut self, line: &str) -> BookstoreResult<Reply> {
        match self.execute(line) {
            Ok(reply) => Ok(reply),
            Err(e) if e.is_rejection() => {
                debug!(error = %e, "command rejected");
                Ok(Reply::line(INVALID))
            }
            Err(e) => Err(e),
        }
    }

    /// Read commands from `input` until `quit`/`exit` or end of input,
    /// writing their output to `output`, then persist the record store
    ///
    /// The store is saved even when reading or executing fails; that
    /// failure is returned afterwards.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> BookstoreResult<()> {
        let outcome = self.read_commands(input, output);
        if let Err(e) = &outcome {
            warn!(error = %e, "stopped reading input");
        }
        let saved = self.storage.save_all();
        outcome.and(saved)
    }

    /// A line that is not valid UTF-8 is a rejected command
    fn read_commands<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        output: &mut W,
    ) -> BookstoreResult<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(());
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }

            let reply = match std::str::from_utf8(&buf) {
                Ok(line) => self.process_line(line)?,
                Err(e) => {
                    debug!(error = %e, "line is not valid UTF-8");
                    Reply::line(INVALID)
                }
            };

            match reply {
                Reply::Quit => return Ok(()),
                Reply::Lines(lines) => {
                    for line in lines {
                        writeln!(output, "{}", line)?;
                    }
                    output.flush()?;
                }
            }
        }
    }

    fn dispatch(&mut self, command: Command) -> BookstoreResult<Reply> {
        match command {
            Command::Quit => Ok(Reply::Quit),

            Command::Login { user_id, password } => {
                self.accounts().login(&user_id, password.as_deref())?;
                Ok(Reply::silent())
            }
            Command::Logout => {
                self.accounts().logout()?;
                Ok(Reply::silent())
            }
            Command::Register {
                user_id,
                password,
                display_name,
            } => {
                self.accounts()
                    .register(&user_id, &password, &display_name)?;
                Ok(Reply::silent())
            }
            Command::ChangePassword {
                user_id,
                current,
                new_password,
            } => {
                self.accounts()
                    .change_password(&user_id, current.as_deref(), &new_password)?;
                Ok(Reply::silent())
            }
            Command::CreateAccount {
                user_id,
                password,
                privilege,
                display_name,
            } => {
                self.accounts()
                    .create(&user_id, &password, privilege, &display_name)?;
                Ok(Reply::silent())
            }
            Command::DeleteAccount { user_id } => {
                self.accounts().delete(&user_id)?;
                Ok(Reply::silent())
            }

            Command::ShowBooks { filter } => {
                let books = BookService::new(&mut self.storage, &mut self.sessions);
                let found = books.show(filter.as_ref())?;
                Ok(Reply::Lines(display::format_book_list(&found)))
            }
            Command::Buy { isbn, quantity } => {
                let total = self.books().buy(&isbn, quantity)?;
                Ok(Reply::line(total.to_string()))
            }
            Command::Select { isbn } => {
                self.books().select(&isbn)?;
                Ok(Reply::silent())
            }
            Command::Modify { update } => {
                self.books().modify(&update)?;
                Ok(Reply::silent())
            }
            Command::Import { quantity, cost } => {
                self.books().import(quantity, cost)?;
                Ok(Reply::silent())
            }

            Command::ShowFinance { count } => {
                let summary = self.reports().finance_summary(count)?;
                Ok(Reply::line(
                    summary
                        .map(|s| display::format_finance_summary(&s))
                        .unwrap_or_default(),
                ))
            }
            Command::ReportFinance => {
                let report = self.reports().finance_report()?;
                Ok(Reply::Lines(display::format_finance_report(&report)))
            }
            Command::ReportEmployee => {
                let entries = self.reports().employee_report()?;
                Ok(Reply::Lines(display::format_operation_log(&entries)))
            }
            Command::Log => {
                let entries = self.reports().operation_log()?;
                Ok(Reply::Lines(display::format_operation_log(&entries)))
            }
        }
    }

    fn accounts(&mut self) -> AccountService<'_> {
        AccountService::new(&mut self.storage, &mut self.sessions)
    }

    fn books(&mut self) -> BookService<'_> {
        BookService::new(&mut self.storage, &mut self.sessions)
    }

    fn reports(&self) -> ReportService<'_> {
        ReportService::new(&self.storage, &self.sessions)
    }
}
