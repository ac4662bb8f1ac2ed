/*!

This is the long-form manual for `poll_results` and `pollres`.

## Input format

A dataset is one comma-separated file (UTF-8). The first row is the header:

```text
Timestamp,Name,Who cooks best?,Who is always late?
```

The first two columns are reserved: the first one is ignored (usually the
timestamp of a form export), the second one holds the respondent. Every other
column is one question, named by the header cell.

Each following row holds the answers of one respondent:

```text
2023/05/01 10:02,Alice,Bob,Carl
2023/05/01 10:07,Farranoushka,Alice,Carl
```

Notes:
- quoted fields are supported, so an answer may contain a comma
- a row shorter than the header only answers the first questions; the missing
  answers are not filled in
- a row without a respondent is skipped
- a file without any row is an error, a file with only the header is a valid,
  empty, dataset

Survey exports in the Excel format (`.xlsx`) follow the same layout, on the
first worksheet unless another one is named.

## Nicknames

Respondents often fill in a joke name. Each dataset can declare nicknames,
mapping the raw value of the respondent column to the name used everywhere
else. Nicknames only apply to respondents, not to answers. An alias may
only be declared once per dataset.

## Registry

The datasets are declared in a JSON registry:

```json
{
  "title": "Mystical Men Results",
  "chartThreshold": 10,
  "titleLineLength": 65,
  "datasets": [
    {
      "key": "season2",
      "filePath": "season2.csv",
      "nicknames": [{ "alias": "Farranoushka", "name": "Farran" }]
    }
  ]
}
```

Adding a dataset only requires a new entry and its file.

## Statistics

The statistics look at all the answers of all the questions of a dataset:
- **most popular** and **least popular**: the answer texts given the most and
  the least often
- **self votes**: answers in which a respondent named themself
- **top pair**: the respondent who most often named the same other respondent

Only the answers that name a respondent of the dataset count as votes. Ties
are broken by the order in which names first appear, reading questions from
left to right and rows from top to bottom.

*/
