use kitten_rescue_core::{
    CatId, CellPosition, Config, FieldSize, GameElementId, GameElementPositions, GameSetup,
    KittenId, ObjectId, SetupError,
};
use thiserror::Error;

const CODE_DOMAIN: &str = "kittens";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded setup.
pub(crate) const CODE_HEADER: &str = "kittens:v1";
/// Delimiter used to separate the prefix, board size, groups and flags.
const FIELD_DELIMITER: char = ':';
/// Two identifier letters, a row digit and a column digit.
const TOKEN_LENGTH: usize = 4;

/// Group of tokens within an encoded setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenGroup {
    /// Static objects.
    Objects,
    /// The mother and the kittens.
    Cats,
}

impl TokenGroup {
    const fn label(self) -> &'static str {
        match self {
            Self::Objects => "objects",
            Self::Cats => "cats",
        }
    }

    const fn accepts(self, element: GameElementId) -> bool {
        matches!(
            (self, element),
            (Self::Objects, GameElementId::Object(_)) | (Self::Cats, GameElementId::Cat(_))
        )
    }
}

/// Errors that can occur while decoding setup codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum SetupTransferError {
    /// The provided string was empty or contained only whitespace.
    #[error("setup code was empty")]
    EmptyPayload,
    /// A required segment was missing.
    #[error("setup code is missing the {0} segment")]
    MissingSegment(&'static str),
    /// The code used an unexpected prefix.
    #[error("setup prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    #[error("setup version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The board size could not be parsed.
    #[error("could not parse board size '{0}'")]
    InvalidFieldSize(String),
    /// A token group was not made of whole four-character tokens.
    #[error("{group} group '{value}' is not a sequence of four-character tokens")]
    MalformedGroup {
        /// Group that failed to split.
        group: &'static str,
        /// Raw group contents.
        value: String,
    },
    /// A token used an unknown element identifier.
    #[error("unknown element code '{0}'")]
    UnknownElement(String),
    /// An element appeared in the wrong group.
    #[error("{element} does not belong in the {group} group")]
    MisplacedElement {
        /// Offending element.
        element: GameElementId,
        /// Group it was found in.
        group: &'static str,
    },
    /// An element was listed twice.
    #[error("{0} is listed more than once")]
    DuplicateElement(GameElementId),
    /// A token carried non-digit coordinates.
    #[error("could not parse coordinates in token '{0}'")]
    InvalidCoordinates(String),
    /// The config flags were not a two-digit hex number.
    #[error("could not parse config flags '{0}'")]
    InvalidFlags(String),
    /// Extra segments followed the flags.
    #[error("unexpected trailing segment '{0}'")]
    TrailingSegment(String),
    /// The decoded pieces do not form a valid setup.
    #[error("decoded setup is invalid: {0}")]
    InvalidSetup(#[from] SetupError),
}

/// Encodes the setup into a single-line code suitable for sharing.
///
/// Solutions are not part of the code; they are recomputed after decoding.
#[must_use]
pub(crate) fn encode_setup(setup: &GameSetup) -> String {
    let positions = setup.element_positions();
    let objects = encode_group(positions, TokenGroup::Objects);
    let cats = encode_group(positions, TokenGroup::Cats);
    format!(
        "{CODE_HEADER}:{}:{objects}:{cats}:{:02x}",
        setup.field_size().get(),
        setup.config().to_flags()
    )
}

/// Decodes a setup from the provided code.
pub(crate) fn decode_setup(value: &str) -> Result<GameSetup, SetupTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SetupTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let mut next = |segment: &'static str| {
        parts
            .next()
            .ok_or(SetupTransferError::MissingSegment(segment))
    };
    let domain = next("prefix")?;
    let version = next("version")?;
    let field_size = next("board size")?;
    let objects = next("objects")?;
    let cats = next("cats")?;
    let flags = next("flags")?;

    if domain != CODE_DOMAIN {
        return Err(SetupTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != CODE_VERSION {
        return Err(SetupTransferError::UnsupportedVersion(version.to_owned()));
    }
    if let Some(extra) = parts.next() {
        return Err(SetupTransferError::TrailingSegment(extra.to_owned()));
    }

    let field_size = parse_field_size(field_size)?;
    let config = parse_flags(flags)?;

    let mut positions = GameElementPositions::empty();
    decode_group(objects, TokenGroup::Objects, &mut positions)?;
    decode_group(cats, TokenGroup::Cats, &mut positions)?;

    Ok(GameSetup::new(field_size, positions, config)?)
}

fn encode_group(positions: &GameElementPositions, group: TokenGroup) -> String {
    positions
        .iter()
        .filter(|(element, _)| group.accepts(*element))
        .filter_map(|(element, position)| {
            position.map(|cell| {
                format!("{}{}{}", element_code(element), cell.row(), cell.column())
            })
        })
        .collect()
}

fn decode_group(
    value: &str,
    group: TokenGroup,
    positions: &mut GameElementPositions,
) -> Result<(), SetupTransferError> {
    if !value.is_ascii() || value.len() % TOKEN_LENGTH != 0 {
        return Err(SetupTransferError::MalformedGroup {
            group: group.label(),
            value: value.to_owned(),
        });
    }

    for start in (0..value.len()).step_by(TOKEN_LENGTH) {
        let token = &value[start..start + TOKEN_LENGTH];
        let (code, coordinates) = token.split_at(2);
        let element = element_from_code(code)
            .ok_or_else(|| SetupTransferError::UnknownElement(code.to_owned()))?;
        if !group.accepts(element) {
            return Err(SetupTransferError::MisplacedElement {
                element,
                group: group.label(),
            });
        }
        if positions.get(element).is_some() {
            return Err(SetupTransferError::DuplicateElement(element));
        }

        let cell = parse_coordinates(coordinates)
            .ok_or_else(|| SetupTransferError::InvalidCoordinates(token.to_owned()))?;
        positions.set(element, Some(cell));
    }

    Ok(())
}

fn parse_field_size(value: &str) -> Result<FieldSize, SetupTransferError> {
    value
        .parse::<u8>()
        .ok()
        .and_then(|size| FieldSize::try_from(size).ok())
        .ok_or_else(|| SetupTransferError::InvalidFieldSize(value.to_owned()))
}

fn parse_flags(value: &str) -> Result<Config, SetupTransferError> {
    if value.len() != 2 {
        return Err(SetupTransferError::InvalidFlags(value.to_owned()));
    }
    u8::from_str_radix(value, 16)
        .map(Config::from_flags)
        .map_err(|_| SetupTransferError::InvalidFlags(value.to_owned()))
}

fn parse_coordinates(value: &str) -> Option<CellPosition> {
    let mut digits = value.chars().map(|digit| digit.to_digit(10));
    let row = u8::try_from(digits.next()??).ok()?;
    let column = u8::try_from(digits.next()??).ok()?;
    Some(CellPosition::new(row, column))
}

const fn element_code(element: GameElementId) -> &'static str {
    match element {
        GameElementId::Object(ObjectId::Moon) => "MO",
        GameElementId::Object(ObjectId::Tree) => "TR",
        GameElementId::Object(ObjectId::Puddle) => "PU",
        GameElementId::Cat(CatId::Mother) => "MA",
        GameElementId::Cat(CatId::Kitten(KittenId::Moony)) => "MY",
        GameElementId::Cat(CatId::Kitten(KittenId::Ivy)) => "IV",
        GameElementId::Cat(CatId::Kitten(KittenId::Splashy)) => "SP",
    }
}

fn element_from_code(code: &str) -> Option<GameElementId> {
    GameElementId::ALL
        .into_iter()
        .find(|element| element_code(*element) == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_setup() -> GameSetup {
        let positions = GameElementPositions::empty()
            .with(ObjectId::Tree, CellPosition::new(0, 2))
            .with(ObjectId::Puddle, CellPosition::new(2, 1))
            .with(CatId::Mother, CellPosition::new(2, 2))
            .with(KittenId::Ivy, CellPosition::new(1, 2))
            .with(KittenId::Splashy, CellPosition::new(3, 3));
        let mut config = Config::default();
        config.objects.moon = false;
        config.kittens.moony = false;
        config.constraints.move_limit = true;
        GameSetup::new(FieldSize::Four, positions, config).expect("valid setup")
    }

    #[test]
    fn encodes_objects_then_cats() {
        let encoded = encode_setup(&sample_setup());

        assert!(encoded.starts_with(&format!("{CODE_HEADER}:4:")));
        assert_eq!(encoded, "kittens:v1:4:TR02PU21:MA22IV12SP33:f6");
    }

    #[test]
    fn round_trip_keeps_positions_and_config() {
        let setup = sample_setup().with_solutions(vec![Vec::new()]);

        let decoded = decode_setup(&encode_setup(&setup)).expect("setup decodes");

        assert_eq!(decoded.field_size(), setup.field_size());
        assert_eq!(decoded.element_positions(), setup.element_positions());
        assert_eq!(decoded.config(), setup.config());
        assert!(decoded.possible_solutions().is_empty());
    }

    #[test]
    fn empty_groups_are_allowed() {
        let decoded = decode_setup("kittens:v1:3::MA11:00").expect("setup decodes");

        assert_eq!(
            decoded.element_positions().get(CatId::Mother),
            Some(CellPosition::new(1, 1))
        );
        assert_eq!(decoded.config(), &Config::from_flags(0));
    }

    #[test]
    fn rejects_malformed_codes() {
        let cases = [
            ("   ", SetupTransferError::EmptyPayload),
            (
                "kittens:v1:5",
                SetupTransferError::MissingSegment("objects"),
            ),
            (
                "puppies:v1:5::MA00:ff",
                SetupTransferError::InvalidPrefix("puppies".to_owned()),
            ),
            (
                "kittens:v2:5::MA00:ff",
                SetupTransferError::UnsupportedVersion("v2".to_owned()),
            ),
            (
                "kittens:v1:6::MA00:ff",
                SetupTransferError::InvalidFieldSize("6".to_owned()),
            ),
            (
                "kittens:v1:5::MA0:ff",
                SetupTransferError::MalformedGroup {
                    group: "cats",
                    value: "MA0".to_owned(),
                },
            ),
            (
                "kittens:v1:5::XX00:ff",
                SetupTransferError::UnknownElement("XX".to_owned()),
            ),
            (
                "kittens:v1:5:MA00::ff",
                SetupTransferError::MisplacedElement {
                    element: CatId::Mother.into(),
                    group: "objects",
                },
            ),
            (
                "kittens:v1:5::MA00MA11:ff",
                SetupTransferError::DuplicateElement(CatId::Mother.into()),
            ),
            (
                "kittens:v1:5::MAx0:ff",
                SetupTransferError::InvalidCoordinates("MAx0".to_owned()),
            ),
            (
                "kittens:v1:5::MA00:zz",
                SetupTransferError::InvalidFlags("zz".to_owned()),
            ),
            (
                "kittens:v1:5::MA00:ff:extra",
                SetupTransferError::TrailingSegment("extra".to_owned()),
            ),
            (
                "kittens:v1:5::IV00:ff",
                SetupTransferError::InvalidSetup(SetupError::MissingMother),
            ),
        ];

        for (code, expected) in cases {
            assert_eq!(decode_setup(code), Err(expected), "decoding {code:?}");
        }
    }

    #[test]
    fn rejects_cats_off_the_board() {
        let error = decode_setup("kittens:v1:3::MA33:ff").expect_err("mother is off the board");

        assert!(matches!(
            error,
            SetupTransferError::InvalidSetup(SetupError::OutOfBounds { .. })
        ));
    }
}
