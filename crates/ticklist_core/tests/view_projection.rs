use chrono::NaiveDate;
use ticklist_core::{project, Category, CategoryFilter, Task, ViewQuery};

fn task(title: &str, category: Category, due: Option<(i32, u32, u32)>, completed: bool) -> Task {
    let mut task = Task::new(
        title,
        category,
        due.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
    )
    .unwrap();
    task.completed = completed;
    task
}

fn titles<'a>(view: &[&'a Task]) -> Vec<&'a str> {
    view.iter().map(|task| task.title.as_str()).collect()
}

#[test]
fn category_filter_excludes_other_categories() {
    let tasks = vec![
        task("report", Category::Work, None, false),
        task("groceries", Category::Personal, None, false),
        task("standup", Category::Work, None, false),
    ];

    let query = ViewQuery {
        filter: CategoryFilter::Only(Category::Work),
        search: String::new(),
    };
    let view = project(&tasks, &query);
    assert_eq!(titles(&view), vec!["report", "standup"]);
}

#[test]
fn search_is_case_insensitive_substring_after_trim() {
    let tasks = vec![
        task("Buy Milk", Category::Personal, None, false),
        task("buy bread", Category::Personal, None, false),
        task("call mom", Category::Personal, None, false),
    ];

    let query = ViewQuery {
        filter: CategoryFilter::All,
        search: "  BUY ".to_string(),
    };
    let view = project(&tasks, &query);
    assert_eq!(titles(&view), vec!["Buy Milk", "buy bread"]);
}

#[test]
fn filter_and_search_combine_conjunctively() {
    let tasks = vec![
        task("work report", Category::Work, None, false),
        task("personal report", Category::Personal, None, false),
        task("work lunch", Category::Work, None, false),
    ];

    let query = ViewQuery {
        filter: CategoryFilter::Only(Category::Work),
        search: "report".to_string(),
    };
    let view = project(&tasks, &query);
    assert_eq!(titles(&view), vec!["work report"]);
}

#[test]
fn due_dates_sort_ascending_within_same_completion() {
    let tasks = vec![
        task("later", Category::Work, Some((2024, 1, 5)), false),
        task("sooner", Category::Work, Some((2024, 1, 1)), false),
    ];

    let query = ViewQuery {
        filter: CategoryFilter::Only(Category::Work),
        search: String::new(),
    };
    let view = project(&tasks, &query);
    assert_eq!(titles(&view), vec!["sooner", "later"]);
}

#[test]
fn completed_tasks_sort_after_incomplete_regardless_of_dates() {
    let tasks = vec![
        task("done early", Category::Work, Some((2024, 1, 1)), true),
        task("open late", Category::Work, Some((2030, 12, 31)), false),
    ];

    let view = project(&tasks, &ViewQuery::default());
    assert_eq!(titles(&view), vec!["open late", "done early"]);
}

#[test]
fn absent_due_date_sorts_earliest() {
    let tasks = vec![
        task("dated", Category::Other, Some((2024, 1, 1)), false),
        task("undated", Category::Other, None, false),
    ];

    let view = project(&tasks, &ViewQuery::default());
    assert_eq!(titles(&view), vec!["undated", "dated"]);
}

#[test]
fn ties_keep_insertion_order() {
    let tasks = vec![
        task("first", Category::Work, Some((2024, 5, 5)), false),
        task("second", Category::Work, Some((2024, 5, 5)), false),
        task("third", Category::Work, None, false),
        task("fourth", Category::Work, None, false),
    ];

    let view = project(&tasks, &ViewQuery::default());
    assert_eq!(titles(&view), vec!["third", "fourth", "first", "second"]);
}

#[test]
fn projection_does_not_reorder_the_input() {
    let tasks = vec![
        task("z done", Category::Work, None, true),
        task("a open", Category::Work, None, false),
    ];

    let view = project(&tasks, &ViewQuery::default());
    assert_eq!(titles(&view), vec!["a open", "z done"]);
    // Input order is untouched; display order is computed.
    assert_eq!(tasks[0].title, "z done");
}

#[test]
fn no_match_yields_empty_view() {
    let tasks = vec![task("only", Category::Work, None, false)];

    let query = ViewQuery {
        filter: CategoryFilter::Only(Category::Personal),
        search: String::new(),
    };
    assert!(project(&tasks, &query).is_empty());
    assert!(project(&[], &ViewQuery::default()).is_empty());
}
