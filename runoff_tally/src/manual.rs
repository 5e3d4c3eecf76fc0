/*!

This is the long-form manual for `runoff_tally` and `rcvforms`.

## Input formats

The following formats are supported:
* `csv` Comma Separated Values, as exported by Google Forms or Microsoft Forms
* `xlsx` The same grid saved as an Excel workbook

Both formats share the same layout. The first row is the header, every following row is one
respondent. By default the first column (the timestamp added by the form) is ignored; see
`firstVoteColumnIndex` below.

### Ranked categories

A ranked category is a group of consecutive columns whose headers look like
`<Category title> [<Candidate name>]`. This is what a **Multiple choice grid** question produces
when the candidates are the rows and the ranks are the columns. Each cell holds the rank given to
that column's candidate: `1`, `2`, ... (ordinal suffixes such as `1º`, `2ª`, `1st` are accepted),
or nothing if the candidate was not ranked.

```text
"Timestamp","Best film [Alien]","Best film [Brazil]","Best film [Cube]","Mascot"
"2024/01/01 10:00","1º","2º","","Rex"
"2024/01/01 10:05","","1º","2º","Tom"
```

The first row above is the ballot `Alien, Brazil` for `Best film`. A ballot stops at the first
rank that nobody holds: a voter ranking only `1` and `3` casts a one-choice ballot. Two
candidates given the same rank make that rank void, which also stops the ballot.

### Plurality categories

A column without a bracketed candidate is a category on its own with no declared slate (`Mascot`
above). Its cells are taken verbatim as the single choice of the ballot, and the slate is made of
the distinct answers, in the order they first appear.

## Tabulation

Every round counts, for each candidate, how many ballots rank them first, second, and so on.
Candidates are ordered on these vectors, comparing first choices, then second choices, etc.
The leader wins if their first choices are strictly more than half of the ballots that still have
a first choice, or when only two candidates remain. Otherwise the last candidate is removed from
the slate and from every ballot, and a new round starts.

Candidates with identical vectors keep the order of the slate. With a random seed
(`--random-seed` or the `random` tiebreak mode), they are instead ordered by a hash of the seed,
the round and their name.

The top candidate of the first round is reported as the honorable mention, unless it is one of
the final two.

## Configuration

The command line covers most uses. A JSON configuration can also be provided with `--config`:

```text
{
  "outputSettings": { "contestName": "Club awards 2024", "outputDirectory": "results" },
  "fileSource": {
    "provider": "csv",
    "filePath": "awards.csv",
    "firstVoteColumnIndex": 2
  },
  "rules": { "tiebreakMode": "random", "randomSeed": "1234" }
}
```

- `provider`: `csv` or `xlsx`.
- `filePath`: relative paths are resolved from the directory of the configuration file.
- `firstVoteColumnIndex` (string or number, optional): 1-based index of the first column holding
  votes. It also accepts a spreadsheet column letter such as `"B"`.
- `excelWorksheetName` (string, optional): for Excel inputs, the name of the worksheet.
- `tiebreakMode`: `useCandidateOrder` (default) or `random`, which requires `randomSeed`.

Command line flags take precedence over the configuration.

 */
