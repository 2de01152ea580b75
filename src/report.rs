use crate::aggregate::Summary;

/// Plain-text analysis: grand total, then one line per category with the
/// amounts right-aligned in a shared column.
pub fn render_text(summary: &Summary) -> String {
    let mut out = format!("Total expenses: {:.2}\n\nExpenses by category:\n", summary.total);

    let amounts: Vec<String> = summary
        .categories
        .iter()
        .map(|entry| format!("{:.2}", entry.amount))
        .collect();
    let label_width = summary
        .categories
        .iter()
        .map(|entry| entry.category.chars().count())
        .max()
        .unwrap_or(0);
    let amount_width = amounts.iter().map(String::len).max().unwrap_or(0);

    for (entry, amount) in summary.categories.iter().zip(&amounts) {
        out.push_str(&format!(
            "{:<label_width$}    {:>amount_width$}\n",
            entry.category, amount,
        ));
    }

    out
}
