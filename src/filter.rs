pub const ALL_CATEGORIES: &str = "all";

pub fn matches_filter(selected: &str, categories: &str) -> bool {
    selected == ALL_CATEGORIES
        || categories
            .split_whitespace()
            .any(|category| category.eq_ignore_ascii_case(selected))
}
