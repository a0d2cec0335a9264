// Mapping mini-language parser

pub mod lexer;
pub mod mapping;

pub use mapping::parse_mapping;

use crate::mapping::RawMapping;
use anyhow::{anyhow, Result};

/// Parse a mapping string, requiring the whole input to be consumed.
pub fn parse_mapping_str(input: &str) -> Result<RawMapping> {
    match parse_mapping(input) {
        Ok((_, mapping)) => Ok(mapping),
        Err(e) => Err(anyhow!("invalid mapping '{}': {}", input, e)),
    }
}
