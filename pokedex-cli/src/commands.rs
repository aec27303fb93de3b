//! REPL command parsing.

use pokedex_core::error::{PokedexError, Result};

/// Usage text printed by `help`.
pub const HELP_TEXT: &str = "\
Usage:
  help              Display all commands
  map               Display the next page of locations
  mapb              Display the previous page of locations
  explore <area>    List the Pokemon found in a listed location (name or id)
  catch <pokemon>   Throw a Pokeball at a Pokemon you have encountered
  inspect <pokemon> Show the stats of a caught Pokemon
  pokedex           List every Pokemon you have caught
  exit              Exit the Pokedex";

/// A parsed REPL command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let argument = words.collect::<Vec<_>>().join(" ");

        let command = match verb.to_lowercase().as_str() {
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "pokedex" => Command::Pokedex,
            "explore" => Command::Explore(required(argument, "explore", "area")?),
            "catch" => Command::Catch(required(argument, "catch", "pokemon")?),
            "inspect" => Command::Inspect(required(argument, "inspect", "pokemon")?),
            _ => return Err(PokedexError::UnknownCommand(verb.to_string())),
        };

        Ok(Some(command))
    }
}

fn required(argument: String, command: &'static str, name: &'static str) -> Result<String> {
    if argument.is_empty() {
        Err(PokedexError::MissingArgument {
            command,
            argument: name,
        })
    } else {
        Ok(argument)
    }
}
