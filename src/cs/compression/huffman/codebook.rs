use super::frequency::{FrequencyTable, SYMBOLS};
use super::tree::{HuffmanNode, HuffmanTree};
use bitvec::prelude::*;
use log::trace;

/// A Huffman code, most significant bit first.
pub type Code = BitVec<u8, Msb0>;

/// Mapping from each symbol present in a tree to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    codes: Vec<Option<Code>>,
}

impl CodeBook {
    /// Walks `tree` depth-first, appending `0` on every left edge and `1` on
    /// every right edge.
    ///
    /// If the tree consists of a single leaf (one unique symbol), the code `0`
    /// is assigned.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; SYMBOLS];
        let mut stack: Vec<(&HuffmanNode, Code)> = vec![(tree.root(), Code::new())];

        while let Some((node, prefix)) = stack.pop() {
            match node {
                HuffmanNode::Leaf { symbol, .. } => {
                    let code = if prefix.is_empty() {
                        bitvec![u8, Msb0; 0]
                    } else {
                        prefix
                    };
                    codes[*symbol as usize] = Some(code);
                }
                HuffmanNode::Internal { left, right, .. } => {
                    let mut right_prefix = prefix.clone();
                    right_prefix.push(true);
                    stack.push((right.as_ref(), right_prefix));
                    let mut left_prefix = prefix;
                    left_prefix.push(false);
                    stack.push((left.as_ref(), left_prefix));
                }
            }
        }

        let book = CodeBook { codes };
        trace!("built code book with {} codes", book.len());
        book
    }

    /// Code of `symbol`, if the symbol occurs in the tree.
    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[symbol as usize].as_deref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols and their codes in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, code)| code.as_deref().map(|c| (s as u8, c)))
    }

    /// Payload size in bits when encoding input with the given counts.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| table.count(symbol) * code.len() as u64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_for(data: &[u8]) -> (FrequencyTable, CodeBook) {
        let table = FrequencyTable::from_bytes(data);
        let book = CodeBook::from_tree(&HuffmanTree::build(&table).unwrap());
        (table, book)
    }

    fn code_string(code: &BitSlice<u8, Msb0>) -> String {
        code.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_every_symbol_has_code() {
        let input = b"this is an example for huffman encoding";
        let (table, book) = book_for(input);
        for &byte in input.iter() {
            assert!(book.get(byte).is_some(), "Missing code for '{}'", byte as char);
        }
        assert_eq!(book.len(), table.distinct());
        assert!(book.get(b'z').is_none());
    }

    #[test]
    fn test_known_codes() {
        // a:5 b:2 c:1 d:1 gives root(left=(b, (c, d)), right=a).
        let (_, book) = book_for(b"aaaaabbcd");
        assert_eq!(code_string(book.get(b'a').unwrap()), "1");
        assert_eq!(code_string(book.get(b'b').unwrap()), "00");
        assert_eq!(code_string(book.get(b'c').unwrap()), "010");
        assert_eq!(code_string(book.get(b'd').unwrap()), "011");
    }

    #[test]
    fn test_single_symbol_gets_one_bit() {
        let (table, book) = book_for(&[0x41; 1000]);
        assert_eq!(book.len(), 1);
        assert_eq!(code_string(book.get(0x41).unwrap()), "0");
        assert_eq!(book.encoded_bits(&table), 1000);

        let tree = HuffmanTree::build(&table).unwrap();
        assert_eq!(tree.code_lengths()[0x41], 1);
    }

    #[test]
    fn test_prefix_free() {
        let input: Vec<u8> = (0..4000u32).map(|i| ((i * i) % 97) as u8).collect();
        let (_, book) = book_for(&input);
        let codes: Vec<_> = book.iter().collect();
        for (a, code_a) in &codes {
            for (b, code_b) in &codes {
                if a != b {
                    assert!(!code_b.starts_with(*code_a), "{} prefixes {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_lengths_match_tree_depths() {
        let input = b"abracadabra abracadabra";
        let table = FrequencyTable::from_bytes(input);
        let tree = HuffmanTree::build(&table).unwrap();
        let book = CodeBook::from_tree(&tree);
        let lengths = tree.code_lengths();
        for (symbol, code) in book.iter() {
            assert_eq!(code.len(), lengths[symbol as usize] as usize);
        }
    }

    #[test]
    fn test_iter_ascending() {
        let (_, book) = book_for(b"zyxzyz");
        let symbols: Vec<u8> = book.iter().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'x', b'y', b'z']);
    }
}
