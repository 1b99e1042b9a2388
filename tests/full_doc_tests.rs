use course_tools::redact::clear_solutions;

use std::fs;

// A course handout touching every region kind: YAML header, labeled
// question cells, a legacy question chunk, answer divs, and plain
// markdown in between.
const HOMEWORK: &str = "\
---
title: Homework 4
echo: false
format: html
---

# Instructions

Answer every question. Show your work.

```{r}
#| label: setup
library(tidyverse)
```

## Question 1

```{r}
#| label: q-1
#| warning: false
fit <- lm(mpg ~ wt, data = mtcars)
summary(fit)
```

::: {.answer}
The slope is negative, so heavier cars get fewer miles per gallon.
About -5.3 mpg per 1000 lbs.
:::

## Question 2

```{r, question-02, eval=FALSE}
#| echo: false
qt(0.975, df = 30)
```

Done.
";

const HOMEWORK_CLEARED: &str = "\
---
title: Homework 4
echo: true
format: html
---

# Instructions

Answer every question. Show your work.

```{r}
#| label: setup
library(tidyverse)
```

## Question 1

```{r}
#| label: q-1
#| warning: false
```

::: {.answer}
Your answer here.
:::

## Question 2

```{r, question-02, eval=FALSE}
#| echo: false
```

Done.
";

#[test]
fn full_homework_document() {
    assert_eq!(clear_solutions(HOMEWORK), HOMEWORK_CLEARED);
}

#[test]
fn cleared_document_is_stable_under_a_second_pass() {
    let once = clear_solutions(HOMEWORK);
    assert_eq!(clear_solutions(&once), once);
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("homework.qmd");
    let output_path = dir.path().join("homework-student.qmd");

    fs::write(&input_path, HOMEWORK).unwrap();

    // Same read/transform/write sequence as the clear-solutions binary
    let input = fs::read_to_string(&input_path).unwrap();
    fs::write(&output_path, clear_solutions(&input)).unwrap();

    assert_eq!(fs::read_to_string(&output_path).unwrap(), HOMEWORK_CLEARED);
}

#[test]
fn document_without_solution_regions_is_unchanged() {
    let doc = "# Notes\n\nJust prose, no code cells.\n\n- a list\n- of things\n";
    assert_eq!(clear_solutions(doc), doc);
}
