use std::path::Path;

/// File name suffix shared by whole images and their parts.
pub const PART_SUFFIX: &str = ".sif";

/// Build the file name for one part: `<prefix>.<zero-padded-index>.sif`.
///
/// `digits` is the minimum width of the index; indices too wide for it are
/// rejected upstream so that every name in a part set has the same width and
/// lexicographic order equals numeric order.
pub fn part_file_name(prefix: &str, index: u32, digits: usize) -> String {
    format!(
        "{}.{:0width$}{}",
        prefix,
        index,
        PART_SUFFIX,
        width = digits
    )
}

/// Report whether `name` is a part file belonging to `prefix`, i.e. matches
/// `<prefix>.<one or more digits>.sif`.
pub fn is_part_file_name(prefix: &str, name: &str) -> bool {
    let rest = match name.strip_prefix(prefix) {
        Some(rest) => rest,
        None => return false,
    };
    let rest = match rest.strip_prefix('.') {
        Some(rest) => rest,
        None => return false,
    };
    let index = match rest.strip_suffix(PART_SUFFIX) {
        Some(index) => index,
        None => return false,
    };

    !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit())
}

/// Derive the default part-set prefix from an input path: the file name with
/// a trailing `.sif` stripped. Returns `None` for paths with no usable file
/// name (e.g. `/` or non-UTF-8 names).
pub fn default_prefix(input: &Path) -> Option<String> {
    let name = input.file_name()?.to_str()?;
    let prefix = name.strip_suffix(PART_SUFFIX).unwrap_or(name);

    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_leading_zeros() {
        assert_eq!(part_file_name("demo", 1, 5), "demo.00001.sif");
        assert_eq!(part_file_name("demo", 42, 5), "demo.00042.sif");
        assert_eq!(part_file_name("demo", 7, 3), "demo.007.sif");
    }

    #[test]
    fn recognizes_own_output() {
        assert!(is_part_file_name("demo", "demo.00001.sif"));
        assert!(is_part_file_name("demo", "demo.12345.sif"));
        assert!(is_part_file_name("demo", "demo.007.sif"));
    }

    #[test]
    fn rejects_other_names() {
        assert!(!is_part_file_name("demo", "demo.sif"));
        assert!(!is_part_file_name("demo", "demo.00001.txt"));
        assert!(!is_part_file_name("demo", "demo.0000x.sif"));
        assert!(!is_part_file_name("demo", "demo..sif"));
        assert!(!is_part_file_name("demo", "other.00001.sif"));
        assert!(!is_part_file_name("demo", "00001.sif"));
    }

    #[test]
    fn default_prefix_strips_sif() {
        assert_eq!(
            default_prefix(Path::new("/images/fedora38.sif")),
            Some("fedora38".to_string())
        );
        assert_eq!(
            default_prefix(Path::new("plain-name")),
            Some("plain-name".to_string())
        );
        assert_eq!(default_prefix(Path::new("/")), None);
        assert_eq!(default_prefix(Path::new(".sif")), None);
    }
}
