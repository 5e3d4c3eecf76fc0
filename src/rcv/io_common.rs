use log::warn;
use std::path::Path;

/// A rectangular view of a form export: the header row, then every data row
/// with its 1-based line number in the file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Grid {
    pub header: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

// Suffixes found after ordinals in form exports: "1º", "2ª", "3°", "1st", "2.".
const ORDINAL_SUFFIXES: [&str; 10] = ["º", "ª", "°", "o", "a", ".", "st", "nd", "rd", "th"];

/// Reads a 1-based rank such as `2`, `2º` or `2nd`.
pub fn parse_rank(cell: &str) -> Option<u32> {
    let cell = cell.trim();
    let digits_end = cell
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(cell.len(), |(idx, _)| idx);
    let (digits, suffix) = cell.split_at(digits_end);
    let suffix = suffix.trim();
    if digits.is_empty() {
        return None;
    }
    if !(suffix.is_empty() || ORDINAL_SUFFIXES.contains(&suffix)) {
        return None;
    }
    digits.parse::<u32>().ok()
}

/// Lays out the ranks given to each candidate as a ballot.
///
/// `ranks` holds (candidate, 1-based rank) pairs, with every rank in `1..=width`.
/// A rank claimed by several candidates is void. The ballot stops at the
/// first rank held by nobody.
pub fn assemble_choices(width: usize, ranks: &[(String, u32)], ballot_id: &str) -> Vec<String> {
    let mut slots: Vec<Option<String>> = vec![None; width];
    let mut overvoted: Vec<bool> = vec![false; width];
    for (cname, rank) in ranks.iter() {
        let pos = (*rank as usize) - 1;
        if overvoted[pos] {
            continue;
        }
        if let Some(previous) = slots[pos].take() {
            warn!(
                "assemble_choices: {}: {:?} and {:?} both ranked {}, the rank is void",
                ballot_id, previous, cname, rank
            );
            overvoted[pos] = true;
        } else {
            slots[pos] = Some(cname.clone());
        }
    }
    slots.into_iter().map_while(|s| s).collect()
}
