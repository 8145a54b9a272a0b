use super::models::{Amount, EntryKind, GroupSummary, LineItem, Summary, TotalsSummary};
use std::collections::HashMap;

/// Totals and per-group figures for a set of line items.
///
/// Groups keep the order in which their label first appears. A group only
/// ever seen with expenses still reports an income total of zero.
#[must_use]
pub fn summarize(items: &[LineItem]) -> Summary {
    let mut groups: Vec<GroupSummary> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut totals = TotalsSummary::default();

    for item in items {
        let slot = *slots.entry(item.group_label.as_str()).or_insert_with(|| {
            groups.push(GroupSummary {
                title: item.group_label.clone(),
                income_total: 0,
                expense_total: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        let (group_total, total) = match item.kind {
            EntryKind::Income => (&mut group.income_total, &mut totals.total_income),
            EntryKind::Expense => (&mut group.expense_total, &mut totals.total_expense),
        };
        *group_total = add_amount(*group_total, item.amount, &item.group_label);
        *total = add_amount(*total, item.amount, "total");
    }

    totals.free_cash = totals
        .total_income
        .checked_sub(totals.total_expense)
        .unwrap_or_else(|| {
            tracing::warn!("free cash out of range, clamping");
            totals.total_income.saturating_sub(totals.total_expense)
        });

    Summary { totals, groups }
}

/// Sums past the `Amount` range clamp to its bounds and are logged.
fn add_amount(sum: Amount, amount: Amount, label: &str) -> Amount {
    sum.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(label, amount, "amount sum out of range, clamping");
        sum.saturating_add(amount)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn income(label: &str, amount: Amount) -> LineItem {
        LineItem::new(label, amount, EntryKind::Income)
    }

    fn expense(label: &str, amount: Amount) -> LineItem {
        LineItem::new(label, amount, EntryKind::Expense)
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let summary = summarize(&[income("Nov", 100), expense("Nov", 40), income("Dec", 10)]);

        assert_eq!(
            summary.groups,
            vec![
                GroupSummary {
                    title: "Nov".to_string(),
                    income_total: 100,
                    expense_total: 40,
                },
                GroupSummary {
                    title: "Dec".to_string(),
                    income_total: 10,
                    expense_total: 0,
                },
            ]
        );
        assert_eq!(
            summary.totals,
            TotalsSummary {
                total_income: 110,
                total_expense: 40,
                free_cash: 70,
            }
        );
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize(&[]);
        assert_eq!(summary.totals, TotalsSummary::default());
        assert!(summary.groups.is_empty());
    }

    #[test]
    fn test_overspend_is_negative() {
        let summary = summarize(&[income("Jan", 50), expense("Rent", 80)]);
        assert_eq!(summary.totals.free_cash, -30);
        assert_eq!(summary.groups[1].income_total, 0);
    }

    #[test]
    fn test_out_of_range_sums_clamp() {
        let summary = summarize(&[income("Big", Amount::MAX), income("Big", 1), expense("Big", 5)]);
        assert_eq!(summary.groups[0].income_total, Amount::MAX);
        assert_eq!(summary.totals.total_income, Amount::MAX);
        assert_eq!(summary.totals.free_cash, Amount::MAX - 5);
    }

    #[test]
    fn test_interleaved_labels_do_not_reorder() {
        let summary = summarize(&[
            expense("Food", 5),
            income("Salary", 9),
            expense("Food", 6),
            expense("Salary", 1),
        ]);
        let titles: Vec<_> = summary.groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Food", "Salary"]);
        assert_eq!(summary.groups[0].expense_total, 11);
        assert_eq!(summary.groups[1].income_total, 9);
        assert_eq!(summary.groups[1].expense_total, 1);
    }

    #[test]
    fn test_group_totals_match_overall_totals() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let labels = ["Nov", "Dec", "Rent", "Food", "Other"];

        for _ in 0..50 {
            let len = rng.gen_range(0..40);
            let items: Vec<LineItem> = (0..len)
                .map(|_| {
                    let label = labels[rng.gen_range(0..labels.len())];
                    let amount = rng.gen_range(0..1_000_000);
                    if rng.gen_bool(0.5) {
                        income(label, amount)
                    } else {
                        expense(label, amount)
                    }
                })
                .collect();

            let summary = summarize(&items);
            let income_sum: Amount = summary.groups.iter().map(|g| g.income_total).sum();
            let expense_sum: Amount = summary.groups.iter().map(|g| g.expense_total).sum();

            assert_eq!(income_sum, summary.totals.total_income);
            assert_eq!(expense_sum, summary.totals.total_expense);
            assert_eq!(
                summary.totals.free_cash,
                summary.totals.total_income - summary.totals.total_expense
            );
        }
    }
}
