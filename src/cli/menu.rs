//! Interactive menu
//!
//! Reads numbered choices and their follow-up prompts line by line and calls
//! the matching contact book operation. Input and output are generic so the
//! loop can be driven from tests.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::display::{format_contact_details, format_contact_list};
use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, ContactField};
use crate::services::ContactBook;

/// Options on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    ViewAll,
    Search,
    Update,
    Delete,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Add),
            "2" => Ok(Self::ViewAll),
            "3" => Ok(Self::Search),
            "4" => Ok(Self::Update),
            "5" => Ok(Self::Delete),
            "0" => Ok(Self::Exit),
            _ => Err(()),
        }
    }
}

/// The menu loop over an input and an output stream
pub struct Menu<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu reading from `input` and writing to `output`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user exits or input ends
    ///
    /// Failed operations are reported and the loop continues. Only failures
    /// to read input or write output end the loop with an error.
    pub fn run(&mut self, book: &mut ContactBook) -> ContactResult<()> {
        loop {
            self.print_menu()?;

            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };

            let flow = match choice.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => break,
                Ok(MenuChoice::Add) => self.add(book)?,
                Ok(MenuChoice::ViewAll) => self.view_all(book)?,
                Ok(MenuChoice::Search) => self.search(book)?,
                Ok(MenuChoice::Update) => self.update(book)?,
                Ok(MenuChoice::Delete) => self.delete(book)?,
                Err(()) => self.say("Invalid choice. Try again.")?,
            };

            if let Some(e) = book.take_audit_error() {
                self.say(&format!("Warning: failed to write audit log: {}", e))?;
            }

            if flow == Flow::EndOfInput {
                break;
            }
        }

        self.say("Exiting. Bye!")?;
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\n===== Contact Book Menu =====\n\
             1. Add Contact\n\
             2. View All Contacts\n\
             3. Search Contact\n\
             4. Update Contact\n\
             5. Delete Contact\n\
             0. Exit"
        )
    }

    fn add(&mut self, book: &mut ContactBook) -> io::Result<Flow> {
        let mut answers = Vec::with_capacity(5);
        for label in ["Name: ", "Phone: ", "Email: ", "Address: ", "Category: "] {
            match self.prompt(label)? {
                Some(answer) => answers.push(answer),
                None => return Ok(Flow::EndOfInput),
            }
        }
        let mut answers = answers.into_iter();
        let mut next = || answers.next().unwrap_or_default();

        let contact = Contact::new(next(), next())
            .with_email(next())
            .with_address(next())
            .with_category(next());
        let name = contact.name.clone();

        match book.add(contact) {
            Ok(()) => self.say(&format!("\nContact '{}' added successfully!", name)),
            Err(e) => self.report(&e),
        }
    }

    fn view_all(&mut self, book: &ContactBook) -> io::Result<Flow> {
        let listing = format_contact_list(book.list_all(), "No contacts available.");
        write!(self.output, "{}", listing)?;
        Ok(Flow::Continue)
    }

    fn search(&mut self, book: &ContactBook) -> io::Result<Flow> {
        let Some(field) = self.prompt("Search by (name/phone/email/address/category): ")? else {
            return Ok(Flow::EndOfInput);
        };
        let field: ContactField = match field.parse() {
            Ok(field) => field,
            Err(e) => return self.report(&e),
        };
        let Some(value) = self.prompt("Enter value to search: ")? else {
            return Ok(Flow::EndOfInput);
        };

        let listing = format_contact_list(book.search(field, &value), "No matching contact found.");
        write!(self.output, "{}", listing)?;
        Ok(Flow::Continue)
    }

    fn update(&mut self, book: &mut ContactBook) -> io::Result<Flow> {
        let Some(name) = self.prompt("Enter contact name to update: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(field) = self.prompt("Field to update (name/phone/email/address/category): ")?
        else {
            return Ok(Flow::EndOfInput);
        };
        let field: ContactField = match field.parse() {
            Ok(field) => field,
            Err(e) => return self.report(&e),
        };
        let Some(value) = self.prompt("New value: ")? else {
            return Ok(Flow::EndOfInput);
        };

        match book.update(&name, field, value) {
            Ok(true) => {
                self.say("Contact updated.")?;
                if field != ContactField::Name {
                    if let Some(contact) = book.find(&name) {
                        write!(self.output, "{}", format_contact_details(contact))?;
                    }
                }
                Ok(Flow::Continue)
            }
            Ok(false) => self.say("Contact not found."),
            Err(e) => self.report(&e),
        }
    }

    fn delete(&mut self, book: &mut ContactBook) -> io::Result<Flow> {
        let Some(name) = self.prompt("Enter name to delete: ")? else {
            return Ok(Flow::EndOfInput);
        };

        match book.delete(&name) {
            Ok(true) => self.say("Deleted."),
            Ok(false) => self.say("Contact not found."),
            Err(e) => self.report(&e),
        }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Ok(None);
        }

        Ok(Some(input.trim().to_string()))
    }

    fn say(&mut self, message: &str) -> io::Result<Flow> {
        writeln!(self.output, "{}", message)?;
        Ok(Flow::Continue)
    }

    fn report(&mut self, error: &ContactError) -> io::Result<Flow> {
        self.say(&format!("Error: {}", error))
    }
}

/// What the loop does after a menu action
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}
