use std::{fs, path::Path};

use anyhow::{Context, Result};
use kitten_rescue_core::{
    CatId, Difficulty, FieldSize, GameElementId, KittenId, ObjectId, Representations,
};
use kitten_rescue_system_generation::GenerationOptions;
use serde::Deserialize;

/// Settings loaded from the optional `--config` TOML file.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CliConfig {
    /// Options handed to the setup generator.
    pub(crate) generation: GenerationOptions,
    /// Replacement glyphs for the board renderer.
    pub(crate) glyphs: GlyphOverrides,
}

impl CliConfig {
    /// Loads the config file, or the defaults when no path was given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to load config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }
}

/// Per-element glyph replacements.
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GlyphOverrides {
    mother: Option<char>,
    moony: Option<char>,
    ivy: Option<char>,
    splashy: Option<char>,
    moon: Option<char>,
    tree: Option<char>,
    puddle: Option<char>,
}

impl GlyphOverrides {
    /// Applies the configured replacements on top of `base`.
    #[must_use]
    pub(crate) fn apply(&self, base: Representations) -> Representations {
        let overrides: [(GameElementId, Option<char>); 7] = [
            (CatId::Mother.into(), self.mother),
            (KittenId::Moony.into(), self.moony),
            (KittenId::Ivy.into(), self.ivy),
            (KittenId::Splashy.into(), self.splashy),
            (ObjectId::Moon.into(), self.moon),
            (ObjectId::Tree.into(), self.tree),
            (ObjectId::Puddle.into(), self.puddle),
        ];

        overrides
            .into_iter()
            .fold(base, |representations, (element, glyph)| match glyph {
                Some(glyph) => representations.with_glyph(element, glyph),
                None => representations,
            })
    }
}

/// Parses a `--difficulty` argument.
pub(crate) fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    match value.to_ascii_lowercase().as_str() {
        "easy" => Ok(Difficulty::Easy),
        "medium" => Ok(Difficulty::Medium),
        "hard" => Ok(Difficulty::Hard),
        "extreme" => Ok(Difficulty::Extreme),
        other => Err(format!(
            "'{other}' is not a difficulty; expected easy, medium, hard or extreme"
        )),
    }
}

/// Parses a `--size` argument.
pub(crate) fn parse_field_size(value: &str) -> Result<FieldSize, String> {
    let size = value
        .parse::<u8>()
        .map_err(|error| format!("invalid board size '{value}': {error}"))?;
    FieldSize::try_from(size).map_err(|error| error.to_string())
}
