//! Image reference parsing for `FROM` instructions.

use crate::instruction::Instruction;

/// A parsed image reference (`registry/repo:tag@digest`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Image name, including any registry and namespace components.
    pub name: String,
    /// Tag, if present.
    pub tag: Option<String>,
    /// Content digest, if pinned.
    pub digest: Option<String>,
}

impl ImageRef {
    /// Parses an image reference string.
    ///
    /// A digest is split at `@`; a tag is the part after the last `:`
    /// that follows the last `/` (so registry ports are not mistaken
    /// for tags). A trailing `:` with nothing after it counts as no
    /// tag at all.
    #[must_use]
    pub fn parse(reference: &str) -> Self {
        let (rest, digest) = match reference.split_once('@') {
            Some((r, d)) => (r, Some(d.to_string())),
            None => (reference, None),
        };

        let slash = rest.rfind('/');
        let colon = rest.rfind(':');
        let (name, tag) = match (slash, colon) {
            (Some(s), Some(c)) if c > s => (&rest[..c], &rest[c + 1..]),
            (None, Some(c)) => (&rest[..c], &rest[c + 1..]),
            _ => (rest, ""),
        };

        Self {
            name: name.to_string(),
            tag: (!tag.is_empty()).then(|| tag.to_string()),
            digest,
        }
    }

    /// Returns the bare repository name without registry or namespace
    /// (e.g. `library/ubuntu` -> `ubuntu`).
    #[must_use]
    pub fn repository(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Returns true if the reference contains a variable expansion and
    /// cannot be judged statically.
    #[must_use]
    pub fn is_variable(&self) -> bool {
        self.name.contains('$')
    }
}

/// The image and optional stage name extracted from a `FROM` instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FromDetails {
    /// The referenced image.
    pub image: ImageRef,
    /// Stage name when the instruction carries `AS <name>`.
    pub stage: Option<String>,
}

/// Extracts the image reference and stage name from a `FROM` instruction.
///
/// Skips leading `--platform=` style flags. Returns `None` when the
/// instruction has no image argument at all.
#[must_use]
pub fn parse_from(instruction: &Instruction) -> Option<FromDetails> {
    let mut args = instruction
        .arguments
        .iter()
        .skip_while(|a| a.starts_with("--"));

    let image = ImageRef::parse(args.next()?);

    let stage = match (args.next(), args.next()) {
        (Some(kw), Some(name)) if kw.eq_ignore_ascii_case("as") => Some(name.clone()),
        _ => None,
    };

    Some(FromDetails { image, stage })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Opcode;

    fn from_instr(args: &[&str]) -> Instruction {
        Instruction::new(
            Opcode::From,
            args.iter().map(ToString::to_string).collect(),
            1,
        )
    }

    #[test]
    fn parses_plain_name() {
        let image = ImageRef::parse("ubuntu");
        assert_eq!(image.name, "ubuntu");
        assert_eq!(image.tag, None);
        assert_eq!(image.digest, None);
    }

    #[test]
    fn parses_name_and_tag() {
        let image = ImageRef::parse("python:3.9-slim");
        assert_eq!(image.name, "python");
        assert_eq!(image.tag.as_deref(), Some("3.9-slim"));
    }

    #[test]
    fn trailing_colon_means_no_tag() {
        let image = ImageRef::parse("ubuntu:");
        assert_eq!(image.name, "ubuntu");
        assert_eq!(image.tag, None);
    }

    #[test]
    fn parses_digest() {
        let image = ImageRef::parse("alpine@sha256:abc123");
        assert_eq!(image.name, "alpine");
        assert_eq!(image.tag, None);
        assert_eq!(image.digest.as_deref(), Some("sha256:abc123"));
    }

    #[test]
    fn registry_port_is_not_a_tag() {
        let image = ImageRef::parse("registry.example.com:5000/team/app");
        assert_eq!(image.name, "registry.example.com:5000/team/app");
        assert_eq!(image.tag, None);
        assert_eq!(image.repository(), "app");
    }

    #[test]
    fn registry_port_with_tag() {
        let image = ImageRef::parse("registry.example.com:5000/team/app:1.2");
        assert_eq!(image.name, "registry.example.com:5000/team/app");
        assert_eq!(image.tag.as_deref(), Some("1.2"));
    }

    #[test]
    fn repository_strips_namespace() {
        let image = ImageRef::parse("library/ubuntu:22.04");
        assert_eq!(image.repository(), "ubuntu");
    }

    #[test]
    fn variable_reference_detected() {
        assert!(ImageRef::parse("${BASE_IMAGE}").is_variable());
        assert!(!ImageRef::parse("ubuntu:22.04").is_variable());
    }

    #[test]
    fn parse_from_skips_platform_flag() {
        let details = parse_from(&from_instr(&["--platform=linux/amd64", "alpine:3.19"])).unwrap();
        assert_eq!(details.image.name, "alpine");
        assert_eq!(details.stage, None);
    }

    #[test]
    fn parse_from_extracts_stage_name() {
        let details = parse_from(&from_instr(&["rust:1.75", "AS", "builder"])).unwrap();
        assert_eq!(details.stage.as_deref(), Some("builder"));
    }

    #[test]
    fn parse_from_stage_keyword_case_insensitive() {
        let details = parse_from(&from_instr(&["rust:1.75", "as", "builder"])).unwrap();
        assert_eq!(details.stage.as_deref(), Some("builder"));
    }

    #[test]
    fn parse_from_empty_args() {
        assert!(parse_from(&from_instr(&[])).is_none());
    }
}
