/*!

# Quick start with Google Forms

This example runs a small club vote end to end, using Google Forms to collect the ballots. The
same steps work with Microsoft Forms.

**Creating the form** Add one **Multiple choice grid** question per category. The rows are the
candidates (`Alice`, `Bob`, `Charlie`), the columns are the ranks (`1º`, `2º`, `3º`). Enable
"Limit to one response per column" so that no two candidates share a rank. The title of the
question becomes the name of the category.

A plain **Short answer** question can be added for a category without candidates, for example
"Club mascot". Every answer counts as a first choice.

**Collecting the results** Once the vote is closed, open the `Responses` tab and download the
responses as CSV. The header row looks like this:

```text
"Timestamp","President [Alice]","President [Bob]","President [Charlie]","Club mascot"
```

**Running the tabulation**

```bash
rcvforms -i 'Club vote.csv' --out results.json
```

The report lists, for every category, the candidates, the ballots, the tally of each round and
the outcome:

```text
== President ==
Candidates: Alice, Bob, Charlie
Ballots (6):
  1. Alice, Bob
  ...
Round 1 (valid first choices: 6, majority above 3)
  1. Alice [1st: 3, 2nd: 2, 3rd: 0]
  2. Bob [1st: 2, 2nd: 2, 3rd: 0]
  3. Charlie [1st: 1, 2nd: 2, 3rd: 1]
  Eliminated: Charlie
Round 2 (valid first choices: 6, majority above 3)
  1. Alice [1st: 4, 2nd: 1]
  2. Bob [1st: 2, 2nd: 2]
Winner for President: Alice (4 votes)
Runner-up: Bob (2 votes)
```

The JSON file written with `--out` holds the same information in a machine readable form. Pass it
back with `--reference` on a later run to check that a recount gives the same result.

*/
