//! Command line parsing.
//!
//! A message is `<prefix><command> [arguments]`. Filter flags are `--name`
//! style; switches take no value, text and integer flags take one token,
//! and comparison flags take every token up to the next `--`.

use pokebot_domain::{FilterFlag, FilterFlags, FlagKind, FlagValue};

use crate::use_cases::collection::{ListRequest, PokemonSelector};

/// A recognized command with its parsed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pick(String),
    Redeem(Option<String>),
    Nickname(String),
    Favorite(PokemonSelector),
    Unfavorite,
    Info(PokemonSelector),
    Select(PokemonSelector),
    Order(String),
    Release(PokemonSelector),
    ReleaseAll(FilterFlags),
    Pokemon(ListRequest),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pick(_) => "pick",
            Command::Redeem(_) => "redeem",
            Command::Nickname(_) => "nickname",
            Command::Favorite(_) => "favorite",
            Command::Unfavorite => "unfavorite",
            Command::Info(_) => "info",
            Command::Select(_) => "select",
            Command::Order(_) => "order",
            Command::Release(_) => "release",
            Command::ReleaseAll(_) => "releaseall",
            Command::Pokemon(_) => "pokemon",
        }
    }
}

/// Why a command's arguments were rejected; shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    #[error("{0}")]
    Usage(String),
    #[error("Unknown flag `--{0}`.")]
    UnknownFlag(String),
    #[error("Missing value for `--{0}`.")]
    MissingValue(FilterFlag),
    #[error("Invalid value for `--{flag}`: `{value}`.")]
    InvalidValue { flag: FilterFlag, value: String },
    #[error("Unexpected argument `{0}`.")]
    Unexpected(String),
}

/// Parse `content`; `None` when it is not a command at all.
pub fn parse_command(prefix: &str, content: &str) -> Option<Result<Command, ArgError>> {
    let body = content.trim().strip_prefix(prefix)?;
    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };
    let rest = if rest.is_empty() { None } else { Some(rest) };

    let command = match name.to_lowercase().as_str() {
        "start" => Ok(Command::Start),
        "pick" => rest
            .map(|name| Command::Pick(name.to_string()))
            .ok_or_else(|| {
                ArgError::Usage(format!(
                    "Please specify a starter pokémon. To view them, type `{}start`.",
                    prefix
                ))
            }),
        "redeem" => Ok(Command::Redeem(rest.map(str::to_string))),
        "nickname" | "nick" => rest
            .map(|text| Command::Nickname(text.to_string()))
            .ok_or_else(|| {
                ArgError::Usage(format!(
                    "`{}nickname <nickname>` to rename your selected pokémon or `{}nickname reset` to remove its nickname.",
                    prefix, prefix
                ))
            }),
        "favorite" | "fav" => selector_or_selected(rest)
            .map(Command::Favorite)
            .ok_or_else(|| {
                ArgError::Usage(format!(
                    "Please use `{p}favorite` to favorite your selected pokémon, `{p}favorite <number>` to favorite another pokémon, or `{p}favorite latest` to favorite your latest pokémon.",
                    p = prefix
                ))
            }),
        "unfavorite" | "unfav" => Ok(Command::Unfavorite),
        "info" => selector_or_selected(rest)
            .map(Command::Info)
            .ok_or_else(|| {
                ArgError::Usage(format!(
                    "Please use `{p}info` to view your selected pokémon, `{p}info <number>` to view another pokémon, or `{p}info latest` to view your latest pokémon.",
                    p = prefix
                ))
            }),
        "select" => rest
            .and_then(PokemonSelector::parse)
            .map(Command::Select)
            .ok_or_else(|| {
                ArgError::Usage(format!(
                    "`{p}select <number>` to select a pokémon or `{p}select latest` to select your latest pokémon.",
                    p = prefix
                ))
            }),
        "order" => Ok(Command::Order(rest.unwrap_or_default().to_string())),
        "release" => rest
            .and_then(PokemonSelector::parse)
            .map(Command::Release)
            .ok_or_else(|| {
                ArgError::Usage(format!(
                    "`{p}release <number>` to release a pokémon, `{p}release latest` to release your latest pokémon, or use `{p}releaseall` to release multiple pokémon.",
                    p = prefix
                ))
            }),
        "releaseall" => {
            let tokens = tokenize(rest);
            parse_flags(&tokens, &FilterFlag::RELEASE).map(Command::ReleaseAll)
        }
        "pokemon" | "p" => parse_list(rest).map(Command::Pokemon),
        _ => return None,
    };
    Some(command)
}

fn tokenize(rest: Option<&str>) -> Vec<&str> {
    rest.map(|r| r.split_whitespace().collect())
        .unwrap_or_default()
}

/// No argument means the selected pokémon.
fn selector_or_selected(rest: Option<&str>) -> Option<PokemonSelector> {
    match rest {
        None => Some(PokemonSelector::Selected),
        Some(text) => PokemonSelector::parse(text),
    }
}

/// Optional leading page number followed by filter flags.
fn parse_list(rest: Option<&str>) -> Result<ListRequest, ArgError> {
    let tokens = tokenize(rest);
    let (page, flag_tokens) = match tokens.split_first() {
        Some((first, remaining)) if !first.starts_with("--") => {
            let page = first
                .parse::<i64>()
                .map_err(|_| ArgError::Unexpected(first.to_string()))?;
            (page, remaining)
        }
        _ => (1, tokens.as_slice()),
    };
    let flags = parse_flags(flag_tokens, &FilterFlag::ALL)?;
    Ok(ListRequest { page, flags })
}

/// Parse `--flag` tokens, accepting only flags in `allowed`.
pub fn parse_flags(tokens: &[&str], allowed: &[FilterFlag]) -> Result<FilterFlags, ArgError> {
    let mut flags = FilterFlags::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let Some(name) = token.strip_prefix("--") else {
            return Err(ArgError::Unexpected(token.to_string()));
        };
        let flag = name
            .parse::<FilterFlag>()
            .ok()
            .filter(|flag| allowed.contains(flag))
            .ok_or_else(|| ArgError::UnknownFlag(name.to_string()))?;
        i += 1;

        let value = match flag.kind() {
            FlagKind::Switch => FlagValue::Switch(true),
            FlagKind::Text | FlagKind::Integer => {
                let raw = tokens
                    .get(i)
                    .filter(|t| !t.starts_with("--"))
                    .ok_or(ArgError::MissingValue(flag))?;
                i += 1;
                if flag.kind() == FlagKind::Text {
                    FlagValue::Text(raw.to_string())
                } else {
                    let level = raw.parse::<u32>().map_err(|_| ArgError::InvalidValue {
                        flag,
                        value: raw.to_string(),
                    })?;
                    FlagValue::Integer(level)
                }
            }
            FlagKind::Comparison => {
                let start = i;
                while i < tokens.len() && !tokens[i].starts_with("--") {
                    i += 1;
                }
                if start == i {
                    return Err(ArgError::MissingValue(flag));
                }
                FlagValue::Tokens(tokens[start..i].iter().map(|t| t.to_string()).collect())
            }
        };
        flags.set(flag, value);
    }
    Ok(flags)
}
