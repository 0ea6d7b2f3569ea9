use crate::args::{Cli, command};
use anyhow::Result;
use clap::ArgMatches;
use is_terminal::IsTerminal;
use std::io::{self, Write};
use thronescli_core::{Config, open_cards, update_cards};
use thronescli_engine::{Options, Painter, Schema, Search, any_given};

pub fn run(schema: &Schema, cli: &Cli, matches: &ArgMatches) -> Result<()> {
    let config = Config::load()?;

    if cli.update {
        update_cards(&config)?;
        println!("Card database updated. Thank you thronesdb.com!");
        return Ok(());
    }

    if !any_given(matches) {
        command(schema).print_help()?;
        return Ok(());
    }
    let options = Options::from_matches(schema, &cli.search, matches)?;

    let search = Search::new(schema, &options);
    let mut selected = Vec::new();
    for card in open_cards(&config)?.records() {
        let card = card?;
        if search.accepts(&card) {
            selected.push(card);
        }
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    search.report(selected, painter(), &mut out)?;
    out.flush()?;
    Ok(())
}

fn painter() -> Painter {
    let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
    Painter::new(color)
}
