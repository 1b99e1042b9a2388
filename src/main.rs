use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use std::fs;

use course_tools::fetch;
use course_tools::wiki::{Lookup, Page, WikiClient, WikiError};
use thiserror::Error;

/// Download a Wikipedia page's plain text content and save it to a file.
#[derive(Parser, Debug)]
struct Args {
    /// The title of the Wikipedia page, a full URL to the Wikipedia
    /// page, or (with --id) a page id
    page_identifier: String,
    /// The Wikipedia page id to download (overrides page_identifier if
    /// provided)
    #[arg(long)]
    id: Option<u64>,
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("the page does not exist")]
    PageNotFound,
    #[error("\"{title}\" may refer to: {}", .options.join(", "))]
    Disambiguation { title: String, options: Vec<String> },
    #[error(transparent)]
    Wiki(#[from] WikiError),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

enum PageRef<'a> {
    Id(u64),
    Title(&'a str),
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let title;
    let page_ref = match args.id {
        Some(id) => PageRef::Id(id),
        None => {
            title = match fetch::page_title(&args.page_identifier) {
                Ok(title) => title,
                Err(e) => {
                    let mut cmd = Args::command();
                    cmd.error(ErrorKind::ValueValidation, e.to_string()).exit();
                }
            };
            PageRef::Title(&title)
        }
    };

    // Failures are reported as plain messages, never as a backtrace
    if let Err(e) = run(page_ref) {
        match e {
            FetchError::PageNotFound => {
                println!(
                    "Error: The page '{}' does not exist.",
                    args.page_identifier
                );
            }
            other => println!("An unexpected error occurred: {}", other),
        }
    }
}

fn run(page_ref: PageRef) -> Result<(), FetchError> {
    let client = WikiClient::new()?;

    let page = match page_ref {
        PageRef::Id(id) => match client.lookup_pageid(id)? {
            Lookup::Found(page) => page,
            Lookup::NotFound => return Err(FetchError::PageNotFound),
            Lookup::Ambiguous(options) => {
                // No tie-break in the id path; this is unexpected
                return Err(FetchError::Disambiguation {
                    title: id.to_string(),
                    options,
                });
            }
        },
        PageRef::Title(title) => resolve_title(&client, title)?,
    };

    let file_name = fetch::output_filename(&page.title);
    fs::write(&file_name, &page.content)?;

    println!("Page content saved to '{}'", file_name);

    Ok(())
}

// Look up a title, settling a disambiguation with an exact
// case-insensitive match when one exists, and falling back to the first
// option otherwise.
fn resolve_title(client: &WikiClient, title: &str) -> Result<Page, FetchError> {
    let options = match client.lookup_title(title)? {
        Lookup::Found(page) => return Ok(page),
        Lookup::NotFound => return Err(FetchError::PageNotFound),
        Lookup::Ambiguous(options) => options,
    };

    let chosen = match fetch::exact_match(title, &options) {
        Some(exact) => exact.to_owned(),
        None => {
            let first = options.first().cloned().ok_or(FetchError::PageNotFound)?;
            println!("Ambiguous title '{}'. Using the first option: {}", title, first);
            first
        }
    };

    match client.lookup_title(&chosen)? {
        Lookup::Found(page) => Ok(page),
        Lookup::NotFound => Err(FetchError::PageNotFound),
        Lookup::Ambiguous(options) => Err(FetchError::Disambiguation {
            title: chosen,
            options,
        }),
    }
}
