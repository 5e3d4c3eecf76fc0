// Turns the grid of a form export into categories of ballots.

use lazy_static::lazy_static;
use regex::Regex;
use runoff_tally::builder::Builder;

use crate::rcv::{
    io_common::{assemble_choices, parse_rank, Grid},
    *,
};

lazy_static! {
    // "<Category title> [<Candidate name>]"
    static ref CANDIDATE_COLUMN: Regex = Regex::new(r"^(.*?) \[(.*)\]$").unwrap();
}

/// Where a category lives in the grid.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategoryColumns {
    pub title: String,
    /// Empty when the category declares no slate.
    pub candidates: Vec<String>,
    /// One column per candidate, or a single free text column.
    pub columns: Vec<usize>,
}

impl CategoryColumns {
    fn is_declared(&self) -> bool {
        !self.candidates.is_empty()
    }
}

/// Splits a header cell into the category title and the candidate, if any.
pub fn split_header(cell: &str) -> (String, Option<String>) {
    let cell = cell.trim();
    match CANDIDATE_COLUMN.captures(cell) {
        Some(caps) => (caps[1].trim().to_string(), Some(caps[2].trim().to_string())),
        None => (cell.to_string(), None),
    }
}

/// Groups the header columns into categories, in input order.
///
/// Consecutive columns sharing a title and naming a candidate form one
/// category. A column without a candidate is a category of its own.
pub fn parse_categories(header: &[String], first_vote_column: usize) -> RcvResult<Vec<CategoryColumns>> {
    ensure!(
        first_vote_column < header.len(),
        MissingVoteColumnsSnafu {
            first_vote_column: first_vote_column + 1,
            width: header.len()
        }
    );

    let mut res: Vec<CategoryColumns> = Vec::new();
    for (col, cell) in header.iter().enumerate().skip(first_vote_column) {
        let (title, candidate) = split_header(cell);
        if title.is_empty() && candidate.is_none() {
            debug!("parse_categories: skipping column {} without header", col);
            continue;
        }
        let extends_last = matches!(
            res.last(),
            Some(cur) if cur.is_declared() && cur.title == title && cur.columns.last() == Some(&(col - 1))
        );
        match candidate {
            Some(cand) if extends_last => {
                if let Some(cur) = res.last_mut() {
                    cur.candidates.push(cand);
                    cur.columns.push(col);
                }
            }
            Some(cand) => res.push(CategoryColumns {
                title,
                candidates: vec![cand],
                columns: vec![col],
            }),
            None => res.push(CategoryColumns {
                title,
                candidates: vec![],
                columns: vec![col],
            }),
        }
    }
    debug!("parse_categories: {:?}", res);
    Ok(res)
}

fn cell<'a>(row: &'a [String], col: usize) -> &'a str {
    row.get(col).map_or("", |s| s.trim())
}

/// Reads the ballot of one row for one category.
pub fn parse_ballot(
    layout: &CategoryColumns,
    header: &[String],
    lineno: usize,
    row: &[String],
) -> RcvResult<Vec<String>> {
    if !layout.is_declared() {
        // Free text: whatever was typed is the only choice.
        let text = cell(row, layout.columns[0]);
        return Ok(if text.is_empty() {
            vec![]
        } else {
            vec![text.to_string()]
        });
    }

    let width = layout.candidates.len();
    let mut ranks: Vec<(String, u32)> = Vec::new();
    for (col, cand) in layout.columns.iter().zip(layout.candidates.iter()) {
        let content = cell(row, *col);
        if content.is_empty() {
            continue;
        }
        let rank = parse_rank(content)
            .filter(|r| *r >= 1 && (*r as usize) <= width)
            .context(InvalidRankSnafu {
                lineno,
                column: header.get(*col).cloned().unwrap_or_default(),
                content,
            })?;
        ranks.push((cand.clone(), rank));
    }
    let ballot_id = format!("line {} ({})", lineno, layout.title);
    Ok(assemble_choices(width, &ranks, &ballot_id))
}

/// Builds every category of the grid, with one ballot per row.
pub fn read_categories(grid: &Grid, first_vote_column: usize) -> RcvResult<Vec<Category>> {
    let layout = parse_categories(&grid.header, first_vote_column)?;

    let mut builders: Vec<Builder> = Vec::new();
    for cat in layout.iter() {
        let builder = Builder::new(&cat.title);
        let builder = if cat.is_declared() {
            builder
                .candidates(&cat.candidates)
                .context(InvalidCategorySnafu {})?
        } else {
            builder
        };
        builders.push(builder);
    }

    for (lineno, row) in grid.rows.iter() {
        for (cat, builder) in layout.iter().zip(builders.iter_mut()) {
            let choices = parse_ballot(cat, &grid.header, *lineno, row)?;
            builder
                .add_ballot_simple(&choices)
                .context(InvalidCategorySnafu {})?;
        }
    }

    let mut res: Vec<Category> = Vec::new();
    for builder in builders {
        res.push(builder.build().context(InvalidCategorySnafu {})?);
    }
    info!(
        "read_categories: {} categories, {} ballots each",
        res.len(),
        grid.rows.len()
    );
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn header() -> Vec<String> {
        strings(&[
            "Timestamp",
            "Best film [Alien]",
            "Best film [Brazil]",
            "Best film [Cube]",
            "Mascot",
            "Best song [Hey [Jude]]",
            "Best song [Yesterday]",
        ])
    }

    #[test]
    fn header_cells() {
        assert_eq!(
            split_header("Best film [Alien]"),
            ("Best film".to_string(), Some("Alien".to_string()))
        );
        assert_eq!(split_header(" Mascot "), ("Mascot".to_string(), None));
        assert_eq!(
            split_header("Best song [Hey [Jude]]"),
            ("Best song".to_string(), Some("Hey [Jude]".to_string()))
        );
    }

    #[test]
    fn columns_grouped_by_title() {
        let layout = parse_categories(&strings(&["T", "A [x]", "A [y]", "B", "A [z]"]), 1).unwrap();
        assert_eq!(layout.len(), 3);
        assert_eq!(layout[0].candidates, strings(&["x", "y"]));
        assert_eq!(layout[0].columns, vec![1, 2]);
        assert_eq!(layout[1].title, "B");
        assert!(layout[1].candidates.is_empty());
        // Not adjacent to the first group: a new category with the same title.
        assert_eq!(layout[2].title, "A");
        assert_eq!(layout[2].columns, vec![4]);
    }

    #[test]
    fn free_text_columns_never_merge() {
        let layout = parse_categories(&strings(&["T", "Notes", "Notes"]), 1).unwrap();
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn vote_columns_must_exist() {
        assert!(matches!(
            parse_categories(&strings(&["Timestamp"]), 1),
            Err(RcvError::MissingVoteColumns { .. })
        ));
    }

    #[test]
    fn ranked_row_becomes_a_ballot() {
        let header = strings(&["T", "F [A]", "F [B]", "F [C]"]);
        let layout = parse_categories(&header, 1).unwrap();
        let row = strings(&["now", "2º", "", "1º"]);
        assert_eq!(
            parse_ballot(&layout[0], &header, 2, &row).unwrap(),
            strings(&["C", "A"])
        );
        // Short rows are unranked at the end.
        let row = strings(&["now", "1"]);
        assert_eq!(
            parse_ballot(&layout[0], &header, 3, &row).unwrap(),
            strings(&["A"])
        );
    }

    #[test]
    fn out_of_range_rank_is_an_error() {
        let header = strings(&["T", "F [A]", "F [B]"]);
        let layout = parse_categories(&header, 1).unwrap();
        for bad in ["3º", "0", "maybe"] {
            let row = strings(&["now", bad, ""]);
            match parse_ballot(&layout[0], &header, 7, &row) {
                Err(RcvError::InvalidRank {
                    lineno,
                    column,
                    content,
                }) => {
                    assert_eq!(lineno, 7);
                    assert_eq!(column, "F [A]");
                    assert_eq!(content, bad);
                }
                x => panic!("unexpected {:?}", x),
            }
        }
    }

    #[test]
    fn grid_to_categories() {
        let grid = Grid {
            header: header(),
            rows: vec![
                (2, strings(&["t1", "1", "2", "3", "Rex", "1", "2"])),
                (3, strings(&["t2", "", "1", "", " Tom ", "2", "1"])),
                (4, strings(&["t3", "", "", "", "", "", ""])),
            ],
        };
        let cats = read_categories(&grid, 1).unwrap();
        assert_eq!(cats.len(), 3);

        assert_eq!(cats[0].title(), "Best film");
        assert_eq!(cats[0].candidates(), strings(&["Alien", "Brazil", "Cube"]).as_slice());
        assert_eq!(cats[0].ballots()[0].choices(), strings(&["Alien", "Brazil", "Cube"]).as_slice());
        assert_eq!(cats[0].ballots()[1].choices(), strings(&["Brazil"]).as_slice());
        assert!(cats[0].ballots()[2].is_empty());

        assert_eq!(cats[1].title(), "Mascot");
        assert_eq!(cats[1].candidates(), strings(&["Rex", "Tom"]).as_slice());
        assert_eq!(cats[1].ballots().len(), 3);

        assert_eq!(cats[2].title(), "Best song");
        assert_eq!(cats[2].candidates(), strings(&["Hey [Jude]", "Yesterday"]).as_slice());
        assert_eq!(cats[2].ballots()[1].choices(), strings(&["Yesterday", "Hey [Jude]"]).as_slice());
    }

    #[test]
    fn blank_candidate_column_is_rejected() {
        let grid = Grid {
            header: strings(&["T", "Film [ ]", "Film [B]"]),
            rows: vec![(2, strings(&["t1", "1", "2"])), (3, strings(&["t2", "2", "1"]))],
        };
        assert!(matches!(
            read_categories(&grid, 1),
            Err(RcvError::InvalidCategory {
                source: VotingErrors::EmptyCandidate { .. }
            })
        ));
    }

    #[test]
    fn repeated_candidate_column_is_rejected() {
        let grid = Grid {
            header: strings(&["T", "F [A]", "F [A]"]),
            rows: vec![],
        };
        assert!(matches!(
            read_categories(&grid, 1),
            Err(RcvError::InvalidCategory { .. })
        ));
    }
}
