// Mapping parser for the command line
//
// Format: key: column, key: [column, column], key: "Quoted Column"

use super::lexer::{column, identifier, ws};
use crate::mapping::{MappingValue, RawMapping};
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{eof, map},
    multi::separated_list0,
    sequence::{delimited, separated_pair},
    IResult,
};

fn parse_value(input: &str) -> IResult<&str, MappingValue> {
    alt((
        map(
            delimited(
                ws(char('[')),
                separated_list0(ws(char(',')), ws(column)),
                ws(char(']')),
            ),
            MappingValue::Many,
        ),
        map(ws(column), MappingValue::One),
    ))(input)
}

fn parse_entry(input: &str) -> IResult<&str, (String, MappingValue)> {
    separated_pair(ws(identifier), ws(char(':')), parse_value)(input)
}

/// Parse a complete mapping. A repeated key keeps its last value.
pub fn parse_mapping(input: &str) -> IResult<&str, RawMapping> {
    let (input, entries) = separated_list0(ws(char(',')), parse_entry)(input)?;
    let (input, _) = ws(eof)(input)?;

    let mapping = entries
        .into_iter()
        .map(|(key, value)| (key, Some(value)))
        .collect();
    Ok((input, mapping))
}
