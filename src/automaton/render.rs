//! Debug/demo-only text rendering, grounded in `dandy/src/table/mod.rs`
//! and its `Dfa::ascii_table`/`gen_table`. This is not a persistence
//! format; round-tripping goes through [`super::persist`].

use super::Automaton;
use crate::table::Table;

impl Automaton {
    /// Renders a transition table: header row is the alphabet, one row
    /// per state (initial marked `->`, accepting marked `*`).
    pub fn to_table(&self) -> String {
        let alphabet = self.alphabet();

        let owned_rows: Vec<Vec<String>> = self
            .states()
            .into_iter()
            .map(|name| {
                let mut row = vec![
                    if self.initial_state() == Some(name) { "->" } else { "" }.to_string(),
                    if self.is_accepting(name) { "*" } else { "" }.to_string(),
                    name.to_string(),
                ];
                for symbol in &alphabet {
                    let cell = match self.transition(name, symbol) {
                        None => String::new(),
                        Some(t) => {
                            let names: Vec<&str> = t.iter().map(|s| s.as_ref()).collect();
                            names.join(",")
                        }
                    };
                    row.push(cell);
                }
                row
            })
            .collect();

        let mut table = Table::default();
        let mut header = vec!["", "", ""];
        header.extend(alphabet.iter().copied());
        table.push_row(header);
        for row in &owned_rows {
            table.push_row(row.iter().map(String::as_str).collect());
        }
        table.render(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_header_and_one_row_per_state() {
        let mut a = Automaton::new();
        a.add_state("q0");
        a.toggle_accepting("q0").unwrap();
        a.set_transition("q0", "a", ["q0"]).unwrap();
        let rendered = a.to_table();
        assert!(rendered.contains("q0"));
        assert!(rendered.contains("->"));
        assert!(rendered.contains('*'));
    }
}
