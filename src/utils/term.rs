/// lays `data` out row by row in `n_cols` columns, each padded to its widest cell
pub fn get_formatted_cols<I, S>(data: I, n_cols: usize) -> String
where
    S: AsRef<str>,
    I: IntoIterator<Item = S>,
{
    let cells: Vec<S> = data.into_iter().collect();
    let n_cols = n_cols.max(1);

    let mut col_widths: Vec<usize> = vec![0; n_cols];
    for (i, cell) in cells.iter().enumerate() {
        let col = i % n_cols;
        col_widths[col] = col_widths[col].max(cell.as_ref().chars().count());
    }

    cells
        .chunks(n_cols)
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(col, cell)| format!("{0:<1$}", cell.as_ref(), col_widths[col]))
                .collect::<Vec<String>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column() {
        assert_eq!(get_formatted_cols(["a.md", "bb.md"], 1), "a.md\nbb.md");
    }

    #[test]
    fn test_columns_are_padded() {
        let out = get_formatted_cols(["a.md", "long-name.md", "c.md", "d.md", "e.md"], 2);
        assert_eq!(out, "a.md  long-name.md\nc.md  d.md\ne.md");
    }

    #[test]
    fn test_empty() {
        assert_eq!(get_formatted_cols(Vec::<String>::new(), 3), "");
    }
}
