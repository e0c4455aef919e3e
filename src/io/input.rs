// src/io/input.rs

use crate::error::InputError;
use std::fs;
use std::path::Path;

/// Raw contents of an input file, before any cross-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub rows: u32,
    pub cols: u32,
    pub num_drones: usize,
    pub deadline: u32,
    pub max_payload: u32,
    pub product_weights: Vec<u32>,
    pub warehouses: Vec<WarehouseInput>,
    pub orders: Vec<OrderInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseInput {
    pub location: (i32, i32),
    pub stock: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderInput {
    pub destination: (i32, i32),
    pub num_items: usize,
    pub product_types: Vec<usize>,
}

/// Reads and parses an input file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedInput, InputError> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

/// Parses the positional text format:
///
/// ```text
/// rows cols drones deadline max_payload
/// P
/// w_0 .. w_{P-1}
/// W
///   row col            (per warehouse)
///   s_0 .. s_{P-1}
/// C
///   row col            (per order)
///   L
///   p_0 .. p_{L-1}
/// ```
pub fn parse_str(text: &str) -> Result<ParsedInput, InputError> {
    let mut lines = Lines::new(text);

    let header: Vec<u32> = lines.numbers("simulation header")?;
    let [rows, cols, num_drones, deadline, max_payload] = header[..] else {
        return Err(lines.malformed(format!(
            "expected 5 header values, found {}",
            header.len()
        )));
    };

    let num_products: usize = lines.single("product count")?;
    let product_weights: Vec<u32> = if num_products == 0 {
        lines.numbers_or_empty("product weights")?
    } else {
        lines.numbers("product weights")?
    };
    if product_weights.len() != num_products {
        return Err(lines.malformed(format!(
            "expected {} product weights, found {}",
            num_products,
            product_weights.len()
        )));
    }

    let num_warehouses: usize = lines.single("warehouse count")?;
    let mut warehouses = Vec::with_capacity(num_warehouses);
    for _ in 0..num_warehouses {
        let location = lines.pair("warehouse location")?;
        let stock: Vec<u32> = lines.numbers("warehouse stock")?;
        if stock.len() != num_products {
            return Err(lines.malformed(format!(
                "expected {} stock counts, found {}",
                num_products,
                stock.len()
            )));
        }
        warehouses.push(WarehouseInput { location, stock });
    }

    let num_orders: usize = lines.single("order count")?;
    let mut orders = Vec::with_capacity(num_orders);
    for _ in 0..num_orders {
        let destination = lines.pair("order destination")?;
        let num_items: usize = lines.single("order item count")?;
        let product_types: Vec<usize> = if num_items == 0 {
            lines.numbers_or_empty("order product types")?
        } else {
            lines.numbers("order product types")?
        };
        if product_types.len() != num_items {
            return Err(lines.malformed(format!(
                "expected {} product types, found {}",
                num_items,
                product_types.len()
            )));
        }
        orders.push(OrderInput {
            destination,
            num_items,
            product_types,
        });
    }

    Ok(ParsedInput {
        rows,
        cols,
        num_drones: num_drones as usize,
        deadline,
        max_payload,
        product_weights,
        warehouses,
        orders,
    })
}

/// Line cursor that remembers the current line number for error messages.
struct Lines<'a> {
    inner: std::str::Lines<'a>,
    line_no: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines(),
            line_no: 0,
        }
    }

    /// One line per field; a blank line is an empty field.
    fn next_line(&mut self, what: &'static str) -> Result<&'a str, InputError> {
        let line = self.inner.next().ok_or(InputError::UnexpectedEof(what))?;
        self.line_no += 1;
        Ok(line)
    }

    fn numbers<T: std::str::FromStr>(&mut self, what: &'static str) -> Result<Vec<T>, InputError> {
        let line = self.next_line(what)?;
        self.tokens(line, what)
    }

    /// Like `numbers`, but a missing final line reads as an empty list.
    fn numbers_or_empty<T: std::str::FromStr>(
        &mut self,
        what: &'static str,
    ) -> Result<Vec<T>, InputError> {
        match self.inner.next() {
            Some(line) => {
                self.line_no += 1;
                self.tokens(line, what)
            }
            None => Ok(Vec::new()),
        }
    }

    fn tokens<T: std::str::FromStr>(
        &self,
        line: &str,
        what: &'static str,
    ) -> Result<Vec<T>, InputError> {
        line.split_whitespace()
            .map(|token| {
                token
                    .parse::<T>()
                    .map_err(|_| self.malformed(format!("invalid {}: '{}'", what, token)))
            })
            .collect()
    }

    fn single<T: std::str::FromStr + Copy>(&mut self, what: &'static str) -> Result<T, InputError> {
        let values: Vec<T> = self.numbers(what)?;
        match values[..] {
            [value] => Ok(value),
            _ => Err(self.malformed(format!("expected a single {}", what))),
        }
    }

    fn pair(&mut self, what: &'static str) -> Result<(i32, i32), InputError> {
        let values: Vec<i32> = self.numbers(what)?;
        match values[..] {
            [row, col] => Ok((row, col)),
            _ => Err(self.malformed(format!("expected two coordinates for {}", what))),
        }
    }

    fn malformed(&self, message: String) -> InputError {
        InputError::Malformed {
            line: self.line_no,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "100 100 3 50 500
3
100 5 450
2
0 0
5 1 0
5 5
0 10 2
3
1 1
2
2 0
3 3
3
0 0 0
5 6
1
2
";

    #[test]
    fn parses_sample_file() {
        let input = parse_str(SAMPLE).unwrap();
        assert_eq!((input.rows, input.cols), (100, 100));
        assert_eq!(input.num_drones, 3);
        assert_eq!(input.deadline, 50);
        assert_eq!(input.max_payload, 500);
        assert_eq!(input.product_weights, vec![100, 5, 450]);
        assert_eq!(input.warehouses.len(), 2);
        assert_eq!(input.warehouses[1].location, (5, 5));
        assert_eq!(input.warehouses[1].stock, vec![0, 10, 2]);
        assert_eq!(input.orders.len(), 3);
        assert_eq!(input.orders[1].product_types, vec![0, 0, 0]);
        assert_eq!(input.orders[2].destination, (5, 6));
    }

    #[test]
    fn reports_line_of_bad_token() {
        let text = "10 10 1 5 10\n2\n1 x\n";
        match parse_str(text) {
            Err(InputError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reports_truncated_input() {
        let text = "10 10 1 5 10\n1\n1\n1\n0 0\n";
        assert!(matches!(parse_str(text), Err(InputError::UnexpectedEof(_))));
    }

    #[test]
    fn rejects_short_header() {
        assert!(matches!(
            parse_str("10 10 1\n"),
            Err(InputError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn blank_line_is_an_empty_product_list() {
        let text = "20 20 1 100 10\n1\n1\n1\n0 0\n5\n2\n0 10\n1\n0\n5 5\n0\n\n";
        let input = parse_str(text).unwrap();
        assert_eq!(input.orders.len(), 2);
        assert_eq!(input.orders[0].product_types, vec![0]);
        assert_eq!(input.orders[1].destination, (5, 5));
        assert!(input.orders[1].product_types.is_empty());

        // the empty list may also be the missing last line
        let clipped = "20 20 1 100 10\n1\n1\n1\n0 0\n5\n1\n5 5\n0\n";
        assert!(parse_str(clipped).unwrap().orders[0].product_types.is_empty());
    }

    #[test]
    fn blank_line_cannot_stand_in_for_a_number() {
        let text = "10 10 1 5 10\n\n1\n";
        assert!(matches!(
            parse_str(text),
            Err(InputError::Malformed { line: 2, .. })
        ));
    }
}
