// Copyright (c) 2025 woxQAQ
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Test fixtures and sample SQL documents

/// Sample SQL documents for testing
pub struct SqlFixtures;

impl SqlFixtures {
    // ===== Basic inserts =====

    /// Two columns, one row
    pub const fn simple_insert() -> &'static str {
        "INSERT INTO users (id, name) VALUES (1, 'bob');"
    }

    /// Two rows without spaces around separators
    pub const fn multi_row_insert() -> &'static str {
        "INSERT INTO t (a,b) VALUES (1,2),(3,4);"
    }

    /// No column list
    pub const fn insert_without_columns() -> &'static str {
        "INSERT INTO t VALUES (1,2);"
    }

    /// Schema-qualified table with a function call as value
    pub const fn schema_qualified_insert() -> &'static str {
        "INSERT INTO public.users (id) VALUES (nextval('seq'))"
    }

    // ===== Count mismatches =====

    /// More columns than values
    pub const fn surplus_columns() -> &'static str {
        "INSERT INTO users (id, name, email) VALUES (1, 'bob');"
    }

    /// More values than columns
    pub const fn surplus_values() -> &'static str {
        "INSERT INTO users (id) VALUES (1, 'bob', 'bob@example.com');"
    }

    // ===== Layout =====

    /// One value per line, commas at line end
    pub const fn multi_line_insert() -> &'static str {
        "INSERT INTO users (id, name, active)\nVALUES (\n  1,\n  'bob',\n  true\n);"
    }

    /// Whitespace and a tab between values and commas
    pub const fn spaced_commas() -> &'static str {
        "INSERT INTO t (a, b) VALUES (1 \t, 2 );"
    }

    /// Several statements, inserts mixed with other kinds
    pub const fn mixed_script() -> &'static str {
        "CREATE TABLE users (id INT, name TEXT);\n\
         INSERT INTO users (id, name) VALUES (1, 'bob');\n\
         SELECT id FROM users;\n\
         INSERT INTO users (id, name) VALUES (2, 'amy');"
    }

    /// Non-ASCII text before a value
    pub const fn unicode_insert() -> &'static str {
        "INSERT INTO notes (title, id) VALUES ('héllo wörld', 7);"
    }

    /// A document without any insert
    pub const fn no_inserts() -> &'static str {
        "SELECT * FROM users WHERE id = 1;"
    }

    /// Generate a script of `statements` inserts with `rows` rows each
    pub fn generated_script(statements: usize, rows: usize) -> String {
        let mut script = String::new();

        for s in 0..statements {
            script.push_str(&format!(
                "INSERT INTO table_{} (id, name, email, active, score) VALUES\n",
                s
            ));
            for r in 0..rows {
                let separator = if r + 1 == rows { ";" } else { "," };
                script.push_str(&format!(
                    "  ({}, 'user_{}', 'user_{}@example.com', true, {}.5){}\n",
                    r, r, r, r, separator
                ));
            }
        }

        script
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_script_shape() {
        let script = SqlFixtures::generated_script(2, 3);

        assert_eq!(script.matches("INSERT INTO").count(), 2);
        assert_eq!(script.lines().count(), 8);
        assert!(script.trim_end().ends_with(';'));
    }
}
