use crate::utils::html::escape;

/// A simple HTML table generator for the tracker pages
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    link_column: Option<(usize, String)>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            rows: Vec::new(),
            link_column: None,
        }
    }

    /// Render cells of column `index` as links to `prefix` + the cell text
    pub fn with_link_column(mut self, index: usize, prefix: &str) -> Self {
        self.link_column = Some((index, prefix.to_string()));
        self
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<&str>) {
        let mut row_strings: Vec<String> = row.iter().map(|s| s.to_string()).collect();
        // Pad short rows so every row has a cell per header
        while row_strings.len() < self.headers.len() {
            row_strings.push(String::new());
        }
        self.rows.push(row_strings);
    }

    /// Render the table as an HTML fragment
    pub fn render(&self) -> String {
        let mut output = String::from("<table>\n<thead>\n");
        output.push_str(&self.render_row(&self.headers, "th", false));
        output.push_str("</thead>\n<tbody>\n");

        for row in &self.rows {
            output.push_str(&self.render_row(row, "td", true));
        }

        output.push_str("</tbody>\n</table>");
        output
    }

    /// Render a single row, escaping every cell
    fn render_row(&self, row: &[String], tag: &str, linkable: bool) -> String {
        let mut line = String::from("<tr>");
        for (i, col) in row.iter().enumerate() {
            let text = escape(col);
            let cell = match &self.link_column {
                Some((index, prefix)) if linkable && *index == i => format!(
                    "<a href=\"{}{}\">{}</a>",
                    prefix,
                    urlencoding::encode(col),
                    text
                ),
                _ => text,
            };
            line.push_str(&format!("<{tag}>{cell}</{tag}>"));
        }
        line.push_str("</tr>\n");
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Name", "Symbol", "Price"]);
        table.add_row(vec!["Bitcoin", "BTC", "$100.00"]);
        table.add_row(vec!["Ethereum", "ETH"]);

        let rendered = table.render();
        assert!(rendered.contains("<th>Name</th>"));
        assert!(rendered.contains("<td>Bitcoin</td>"));
        assert!(rendered.contains("<td>ETH</td><td></td></tr>"));
    }

    #[test]
    fn test_link_column_encodes_and_escapes() {
        let mut table = Table::new(vec!["Name"]).with_link_column(0, "/crypto/");
        table.add_row(vec!["Bitcoin Cash"]);
        table.add_row(vec!["<b>"]);

        let rendered = table.render();
        assert!(rendered.contains("<a href=\"/crypto/Bitcoin%20Cash\">Bitcoin Cash</a>"));
        assert!(rendered.contains("&lt;b&gt;"));
        assert!(!rendered.contains("<th><a"));
    }
}
