use crate::screening::{classify, Category};

#[test]
fn single_category_clause() {
    assert_eq!(
        classify("契約事務取扱規則第70条に該当しない者であること"),
        vec![Category::Ineligibility]
    );
}

#[test]
fn ambiguous_clause_fans_out_to_every_matching_category() {
    let categories =
        classify("競争参加資格においてB等級であり、元請けとしての実績を有すること");
    assert_eq!(categories, vec![Category::GradeAndItem, Category::Experience]);
}

#[test]
fn unmatched_clause_falls_back_to_other() {
    assert_eq!(
        classify("入札保証金は免除する"),
        vec![Category::Other]
    );
}

#[test]
fn classification_is_deterministic() {
    let text = "監理技術者を専任で配置し、工事成績評定65点以上の実績を有すること";
    assert_eq!(classify(text), classify(text));
}
