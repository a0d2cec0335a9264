// Lexical helpers shared by the mapping parser

use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_while1},
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, recognize, value},
    multi::many0,
    sequence::{delimited, pair},
    IResult,
};

/// Wrap a parser so it skips surrounding whitespace.
pub fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// A role key: letters, digits and underscores, not starting with a digit.
pub fn identifier(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        String::from,
    )(input)
}

/// Double-quoted string with `\"` and `\\` escapes.
pub fn string_literal(input: &str) -> IResult<&str, String> {
    alt((
        map(tag("\"\""), |_| String::new()),
        delimited(
            char('"'),
            escaped_transform(
                is_not("\\\""),
                '\\',
                alt((value("\\", tag("\\")), value("\"", tag("\"")))),
            ),
            char('"'),
        ),
    ))(input)
}

fn is_column_char(c: char) -> bool {
    c.is_alphanumeric() || "_-.".contains(c)
}

/// An unquoted column name: any letters or digits, plus dots, dashes and
/// underscores, so headers like `temp.max`, `q-1` or `température` need
/// no quoting.
pub fn bare_column(input: &str) -> IResult<&str, String> {
    map(take_while1(is_column_char), String::from)(input)
}

/// A column reference, quoted or bare.
pub fn column(input: &str) -> IResult<&str, String> {
    alt((string_literal, bare_column))(input)
}
