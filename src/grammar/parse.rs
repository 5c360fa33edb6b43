//! The textual grammar form (§6): lines of the shape
//! `N -> a1 | a2 | ...`, where `N` is an uppercase letter optionally
//! followed by `'`, and each `ai` is `[a-z0-9&][A-Z]?`. The first line's
//! non-terminal is the initial symbol. Combinator style grounded in
//! `dandy/src/parser/fa.rs`.

use super::{Grammar, GrammarError};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, one_of, satisfy, space0};
use nom::combinator::{all_consuming, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::{Finish, IResult};

fn non_terminal(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(|c: char| c.is_ascii_uppercase()), opt(char('\''))))(input)
}

fn rhs_symbol(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        one_of("abcdefghijklmnopqrstuvwxyz0123456789&"),
        opt(satisfy(|c: char| c.is_ascii_uppercase())),
    ))(input)
}

fn arrow(input: &str) -> IResult<&str, &str> {
    preceded(space0, terminated(tag("->"), space0))(input)
}

fn alternatives(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(tuple((space0, char('|'), space0)), rhs_symbol)(input)
}

fn line(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    let (input, nt) = preceded(space0, non_terminal)(input)?;
    let (input, _) = arrow(input)?;
    let (input, rhss) = alternatives(input)?;
    let (input, _) = space0(input)?;
    Ok((input, (nt, rhss)))
}

fn full_line(input: &str) -> IResult<&str, (&str, Vec<&str>)> {
    all_consuming(line)(input)
}

/// Parses the full textual grammar form: one non-empty, non-blank line
/// per non-terminal, in any order, first line's non-terminal becomes the
/// initial symbol.
pub fn parse(input: &str) -> Result<Grammar, GrammarError> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = lines.next().ok_or_else(|| {
        GrammarError::InvalidGrammar("grammar text has no productions".to_string())
    })?;

    let (nt, rhss) = full_line(first)
        .finish()
        .map_err(|e| GrammarError::InvalidGrammar(format!("{first}: {e:?}")))?
        .1;
    let mut grammar = Grammar::new(nt);
    for rhs in rhss {
        grammar.add_production(nt, rhs);
    }

    for raw in lines {
        let (nt, rhss) = full_line(raw)
            .finish()
            .map_err(|e| GrammarError::InvalidGrammar(format!("{raw}: {e:?}")))?
            .1;
        for rhs in rhss {
            grammar.add_production(nt, rhs);
        }
    }
    Ok(grammar)
}
