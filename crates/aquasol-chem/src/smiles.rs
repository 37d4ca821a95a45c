use std::collections::HashMap;

use crate::errors::SmilesError;
use crate::model::{Atom, Bond, BondOrder, Element, Molecule};

/// Parses a SMILES string into a [`Molecule`].
///
/// Supported notation: organic-subset atoms and their aromatic lowercase
/// forms, bracket atoms (isotope, explicit hydrogens, formal charge,
/// chirality marks are accepted and the stereo/isotope parts ignored),
/// bond symbols `- = # :` plus directional `/` and `\` read as single
/// bonds, branches, ring closures (`1`..`9` and `%nn`), and `.` between
/// disconnected fragments. Aromaticity is taken from the notation itself;
/// Kekulé-form rings are not re-perceived as aromatic.
pub fn parse_smiles(input: &str) -> Result<Molecule, SmilesError> {
    Parser::new(input).run()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    prev: Option<usize>,
    pending_bond: Option<BondOrder>,
    branch_stack: Vec<Option<usize>>,
    open_rings: HashMap<u16, (usize, Option<BondOrder>)>,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            atoms: Vec::new(),
            bonds: Vec::new(),
            prev: None,
            pending_bond: None,
            branch_stack: Vec::new(),
            open_rings: HashMap::new(),
        }
    }

    fn run(mut self) -> Result<Molecule, SmilesError> {
        if self.chars.is_empty() {
            return Err(SmilesError::Empty);
        }

        while let Some(c) = self.peek() {
            match c {
                '-' | '/' | '\\' => self.set_pending_bond(BondOrder::Single)?,
                '=' => self.set_pending_bond(BondOrder::Double)?,
                '#' => self.set_pending_bond(BondOrder::Triple)?,
                ':' => self.set_pending_bond(BondOrder::Aromatic)?,
                '.' => {
                    if self.pending_bond.is_some() {
                        return Err(SmilesError::DanglingBond);
                    }
                    self.prev = None;
                    self.pos += 1;
                }
                '(' => {
                    if self.prev.is_none() {
                        return Err(SmilesError::UnexpectedCharacter {
                            position: self.pos,
                            found: c,
                        });
                    }
                    self.branch_stack.push(self.prev);
                    self.pos += 1;
                }
                ')' => {
                    if self.pending_bond.is_some() {
                        return Err(SmilesError::DanglingBond);
                    }
                    self.prev = self
                        .branch_stack
                        .pop()
                        .ok_or(SmilesError::UnbalancedBranch)?;
                    self.pos += 1;
                }
                '0'..='9' => {
                    let label = c as u16 - '0' as u16;
                    self.pos += 1;
                    self.close_or_open_ring(label)?;
                }
                '%' => {
                    self.pos += 1;
                    let label = self.parse_two_digit_label()?;
                    self.close_or_open_ring(label)?;
                }
                '[' => self.parse_bracket_atom()?,
                _ => self.parse_organic_atom(c)?,
            }
        }

        if self.pending_bond.is_some() {
            return Err(SmilesError::DanglingBond);
        }
        if !self.branch_stack.is_empty() {
            return Err(SmilesError::UnbalancedBranch);
        }
        if let Some(label) = self.open_rings.keys().next().copied() {
            return Err(SmilesError::OpenRingBond { label });
        }
        if self.atoms.is_empty() {
            return Err(SmilesError::Empty);
        }

        Ok(Molecule::assemble(self.atoms, self.bonds))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn set_pending_bond(&mut self, order: BondOrder) -> Result<(), SmilesError> {
        if self.pending_bond.is_some() || self.prev.is_none() {
            return Err(SmilesError::DanglingBond);
        }
        self.pending_bond = Some(order);
        self.pos += 1;
        Ok(())
    }

    fn parse_two_digit_label(&mut self) -> Result<u16, SmilesError> {
        let mut label = 0u16;
        for _ in 0..2 {
            let c = self.peek().ok_or(SmilesError::DanglingBond)?;
            let digit = c.to_digit(10).ok_or(SmilesError::UnexpectedCharacter {
                position: self.pos,
                found: c,
            })?;
            label = label * 10 + digit as u16;
            self.pos += 1;
        }
        Ok(label)
    }

    fn close_or_open_ring(&mut self, label: u16) -> Result<(), SmilesError> {
        let here = self.prev.ok_or(SmilesError::InvalidRingClosure { label })?;

        if let Some((there, stored)) = self.open_rings.remove(&label) {
            if there == here {
                return Err(SmilesError::InvalidRingClosure { label });
            }
            let order = match (stored, self.pending_bond.take()) {
                (None, None) => self.default_bond_order(there, here),
                (Some(order), None) | (None, Some(order)) => order,
                (Some(a), Some(b)) if a == b => a,
                _ => return Err(SmilesError::InvalidRingClosure { label }),
            };
            self.bonds.push(Bond {
                a: there,
                b: here,
                order,
            });
        } else {
            self.open_rings
                .insert(label, (here, self.pending_bond.take()));
        }
        Ok(())
    }

    fn parse_organic_atom(&mut self, c: char) -> Result<(), SmilesError> {
        let position = self.pos;
        let (element, aromatic) = match c {
            'b' => (Element::B, true),
            'c' => (Element::C, true),
            'n' => (Element::N, true),
            'o' => (Element::O, true),
            'p' => (Element::P, true),
            's' => (Element::S, true),
            'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' => {
                // Two-letter organic-subset symbols take priority: Cl, Br.
                let symbol = match (c, self.chars.get(self.pos + 1).copied()) {
                    ('C', Some('l')) => {
                        self.pos += 1;
                        "Cl"
                    }
                    ('B', Some('r')) => {
                        self.pos += 1;
                        "Br"
                    }
                    _ => {
                        // Single-letter symbol; build from the char itself.
                        match c {
                            'B' => "B",
                            'C' => "C",
                            'N' => "N",
                            'O' => "O",
                            'P' => "P",
                            'S' => "S",
                            'F' => "F",
                            _ => "I",
                        }
                    }
                };
                let element =
                    Element::from_symbol(symbol).ok_or_else(|| SmilesError::UnknownElement {
                        position,
                        symbol: symbol.to_string(),
                    })?;
                (element, false)
            }
            _ => {
                return Err(SmilesError::UnexpectedCharacter {
                    position,
                    found: c,
                })
            }
        };
        self.pos += 1;
        self.add_atom(Atom::new(element, aromatic))
    }

    fn parse_bracket_atom(&mut self) -> Result<(), SmilesError> {
        let open_position = self.pos;
        self.pos += 1;

        let mut content = String::new();
        loop {
            match self.peek() {
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                Some(c) => {
                    content.push(c);
                    self.pos += 1;
                }
                None => {
                    return Err(SmilesError::UnterminatedBracket {
                        position: open_position,
                    })
                }
            }
        }

        let atom = parse_bracket_content(&content, open_position)?;
        self.add_atom(atom)
    }

    fn add_atom(&mut self, atom: Atom) -> Result<(), SmilesError> {
        let index = self.atoms.len();
        self.atoms.push(atom);

        match self.prev {
            Some(prev) => {
                let order = self
                    .pending_bond
                    .take()
                    .unwrap_or_else(|| self.default_bond_order(prev, index));
                self.bonds.push(Bond {
                    a: prev,
                    b: index,
                    order,
                });
            }
            None => {
                if self.pending_bond.is_some() {
                    return Err(SmilesError::DanglingBond);
                }
            }
        }

        self.prev = Some(index);
        Ok(())
    }

    /// An unannotated bond between two aromatic atoms is aromatic.
    fn default_bond_order(&self, a: usize, b: usize) -> BondOrder {
        if self.atoms[a].is_aromatic && self.atoms[b].is_aromatic {
            BondOrder::Aromatic
        } else {
            BondOrder::Single
        }
    }
}

fn parse_bracket_content(content: &str, position: usize) -> Result<Atom, SmilesError> {
    let malformed = || SmilesError::MalformedBracket {
        content: content.to_string(),
    };

    let chars: Vec<char> = content.chars().collect();
    let mut i = 0;

    // Optional isotope number, ignored.
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }

    let first = *chars.get(i).ok_or_else(malformed)?;
    let (symbol, aromatic) = if first.is_ascii_uppercase() {
        let mut symbol = first.to_string();
        if let Some(&next) = chars.get(i + 1) {
            if next.is_ascii_lowercase() && Element::from_symbol(&format!("{first}{next}")).is_some()
            {
                symbol.push(next);
                i += 1;
            }
        }
        i += 1;
        (symbol, false)
    } else if matches!(first, 'b' | 'c' | 'n' | 'o' | 'p' | 's') {
        i += 1;
        (first.to_ascii_uppercase().to_string(), true)
    } else {
        return Err(malformed());
    };

    let element = Element::from_symbol(&symbol).ok_or(SmilesError::UnknownElement {
        position,
        symbol,
    })?;

    let mut atom = Atom::new(element, aromatic);
    atom.bracket_hydrogens = Some(0);

    while i < chars.len() {
        match chars[i] {
            '@' => i += 1,
            'H' => {
                i += 1;
                let mut count = 0u8;
                let mut saw_digit = false;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    count = count
                        .checked_mul(10)
                        .and_then(|c| c.checked_add(chars[i] as u8 - b'0'))
                        .ok_or_else(malformed)?;
                    saw_digit = true;
                    i += 1;
                }
                atom.bracket_hydrogens = Some(if saw_digit { count } else { 1 });
            }
            sign @ ('+' | '-') => {
                i += 1;
                let unit: i8 = if sign == '+' { 1 } else { -1 };
                let mut magnitude = 1i8;
                if i < chars.len() && chars[i].is_ascii_digit() {
                    let mut value = 0i8;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        value = value
                            .checked_mul(10)
                            .and_then(|v| v.checked_add((chars[i] as u8 - b'0') as i8))
                            .ok_or_else(malformed)?;
                        i += 1;
                    }
                    magnitude = value;
                } else {
                    while i < chars.len() && chars[i] == sign {
                        magnitude = magnitude.checked_add(1).ok_or_else(malformed)?;
                        i += 1;
                    }
                }
                atom.formal_charge = unit * magnitude;
            }
            ':' => {
                // Atom-map class, ignored.
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            _ => return Err(malformed()),
        }
    }

    Ok(atom)
}
