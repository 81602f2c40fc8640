use crate::domain::entities::record::Record;

/// Renders records into display cells, one per requested column.
pub fn render_rows<'a, R, I>(records: I, columns: &[&str]) -> Vec<Vec<String>>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.field(column).display())
                .collect()
        })
        .collect()
}
