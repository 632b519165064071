use crate::data::model::{FeatureRow, FeatureTable};

/// One categorical column and the values seen for it during fitting.
#[derive(Debug, Clone, PartialEq)]
struct CategoricalColumn {
    index: usize,
    name: String,
    /// Sorted, distinct.
    categories: Vec<String>,
}

/// One-hot encodes the categorical columns and passes every other column
/// through unchanged. Values not seen while fitting encode to all zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnEncoder {
    categorical: Vec<CategoricalColumn>,
    passthrough: Vec<(usize, String)>,
}

/// An encoded row. Missing numeric inputs stay `None`.
pub type EncodedRow = Vec<Option<f64>>;

impl ColumnEncoder {
    /// Learn the category vocabulary of each named column.
    /// Names absent from the table are ignored.
    pub fn fit(table: &FeatureTable, categorical: &[&str]) -> Self {
        let categorical_cols: Vec<CategoricalColumn> = categorical
            .iter()
            .filter_map(|name| {
                let index = table.column_index(name)?;
                let categories = table
                    .unique_values
                    .get(*name)
                    .map(|vals| vals.iter().cloned().collect())
                    .unwrap_or_default();
                Some(CategoricalColumn {
                    index,
                    name: name.to_string(),
                    categories,
                })
            })
            .collect();

        let passthrough = table
            .column_names
            .iter()
            .enumerate()
            .filter(|(i, _)| !categorical_cols.iter().any(|c| c.index == *i))
            .map(|(i, name)| (i, name.clone()))
            .collect();

        ColumnEncoder {
            categorical: categorical_cols,
            passthrough,
        }
    }

    /// Length of an encoded row.
    pub fn width(&self) -> usize {
        self.categorical
            .iter()
            .map(|c| c.categories.len())
            .sum::<usize>()
            + self.passthrough.len()
    }

    /// Encode one row laid out like the fitted table.
    pub fn transform_row(&self, row: &FeatureRow) -> EncodedRow {
        let mut out = Vec::with_capacity(self.width());

        for col in &self.categorical {
            let start = out.len();
            out.extend(std::iter::repeat(Some(0.0)).take(col.categories.len()));
            let value = row.get(col.index).and_then(|v| v.as_text());
            match value.map(|v| col.categories.binary_search_by(|c| c.as_str().cmp(v))) {
                Some(Ok(pos)) => out[start + pos] = Some(1.0),
                _ => log::debug!("Unseen {} value {:?}; encoded as zeros", col.name, value),
            }
        }

        for (index, _) in &self.passthrough {
            out.push(row.get(*index).and_then(|v| v.as_f64()));
        }

        out
    }

    pub fn transform(&self, table: &FeatureTable) -> Vec<EncodedRow> {
        table.rows.iter().map(|r| self.transform_row(r)).collect()
    }

    /// Names of the encoded features, e.g. `Company=Oracle`, `Ratings`.
    pub fn feature_names(&self) -> Vec<String> {
        self.categorical
            .iter()
            .flat_map(|c| c.categories.iter().map(move |v| format!("{}={}", c.name, v)))
            .chain(self.passthrough.iter().map(|(_, name)| name.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FeatureValue, FEATURE_COLUMNS};

    fn row(company: &str, reviews: Option<f64>) -> FeatureRow {
        FEATURE_COLUMNS
            .iter()
            .map(|col| match *col {
                "Company" => FeatureValue::text(company),
                "Reviews" => FeatureValue::from(reviews),
                "Location" | "Title" | "Skills" | "Industry" => FeatureValue::text("x"),
                _ => FeatureValue::Number(1.0),
            })
            .collect()
    }

    #[test]
    fn one_hot_block_then_passthrough() {
        let table = FeatureTable::from_rows(vec![row("Oracle", Some(5.0)), row("Accenture", None)]);
        let enc = ColumnEncoder::fit(&table, &["Company", "Location"]);

        // 2 companies + 1 location + 11 passthrough columns
        assert_eq!(enc.width(), 14);
        let names = enc.feature_names();
        assert_eq!(names[0], "Company=Accenture");
        assert_eq!(names[1], "Company=Oracle");
        assert_eq!(names[2], "Location=x");
        assert_eq!(names[3], "Ratings");

        let encoded = enc.transform(&table);
        assert_eq!(&encoded[0][..3], &[Some(0.0), Some(1.0), Some(1.0)]);
        // Reviews is the second passthrough column
        assert_eq!(encoded[0][4], Some(5.0));
        assert_eq!(encoded[1][4], None);
    }

    #[test]
    fn unseen_category_encodes_to_zeros() {
        let table = FeatureTable::from_rows(vec![row("Oracle", Some(5.0))]);
        let enc = ColumnEncoder::fit(&table, &["Company"]);
        let encoded = enc.transform_row(&row("Nobody Inc", Some(5.0)));
        assert_eq!(encoded[0], Some(0.0));
        assert_eq!(encoded.len(), enc.width());
    }
}
