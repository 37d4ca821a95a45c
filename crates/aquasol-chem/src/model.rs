use std::fmt;

/// Elements the toolkit understands. Anything else is a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    H,
    Li,
    B,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    Si,
    P,
    S,
    Cl,
    K,
    Ca,
    Br,
    I,
}

impl Element {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "H" => Some(Element::H),
            "Li" => Some(Element::Li),
            "B" => Some(Element::B),
            "C" => Some(Element::C),
            "N" => Some(Element::N),
            "O" => Some(Element::O),
            "F" => Some(Element::F),
            "Na" => Some(Element::Na),
            "Mg" => Some(Element::Mg),
            "Si" => Some(Element::Si),
            "P" => Some(Element::P),
            "S" => Some(Element::S),
            "Cl" => Some(Element::Cl),
            "K" => Some(Element::K),
            "Ca" => Some(Element::Ca),
            "Br" => Some(Element::Br),
            "I" => Some(Element::I),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::Li => "Li",
            Element::B => "B",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::Si => "Si",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Br => "Br",
            Element::I => "I",
        }
    }

    /// Standard (average) atomic weight in Daltons.
    pub fn atomic_weight(&self) -> f64 {
        match self {
            Element::H => 1.008,
            Element::Li => 6.94,
            Element::B => 10.81,
            Element::C => 12.011,
            Element::N => 14.007,
            Element::O => 15.999,
            Element::F => 18.998,
            Element::Na => 22.990,
            Element::Mg => 24.305,
            Element::Si => 28.085,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::Cl => 35.45,
            Element::K => 39.098,
            Element::Ca => 40.078,
            Element::Br => 79.904,
            Element::I => 126.904,
        }
    }

    /// Default valences used for implicit hydrogen assignment, smallest first.
    /// Metals get no implicit hydrogens (they only appear in bracket atoms).
    pub fn default_valences(&self) -> &'static [u8] {
        match self {
            Element::H => &[1],
            Element::B => &[3],
            Element::C => &[4],
            Element::N => &[3, 5],
            Element::O => &[2],
            Element::F | Element::Cl | Element::Br | Element::I => &[1],
            Element::Si => &[4],
            Element::P => &[3, 5],
            Element::S => &[2, 4, 6],
            Element::Li | Element::Na | Element::Mg | Element::K | Element::Ca => &[],
        }
    }

    pub fn is_heavy(&self) -> bool {
        !matches!(self, Element::H)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondOrder {
    /// Twice the nominal bond order, so aromatic (1.5) stays integral.
    pub(crate) fn doubled(&self) -> u32 {
        match self {
            BondOrder::Single => 2,
            BondOrder::Double => 4,
            BondOrder::Triple => 6,
            BondOrder::Aromatic => 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Atom {
    pub element: Element,
    pub is_aromatic: bool,
    pub formal_charge: i8,
    /// Hydrogen count written inside a bracket atom; `None` for
    /// organic-subset atoms, whose hydrogens are assigned from valence.
    pub bracket_hydrogens: Option<u8>,
    pub implicit_hydrogens: u8,
}

impl Atom {
    pub(crate) fn new(element: Element, is_aromatic: bool) -> Self {
        Self {
            element,
            is_aromatic,
            formal_charge: 0,
            bracket_hydrogens: None,
            implicit_hydrogens: 0,
        }
    }

    /// Hydrogens carried by this atom itself (implicit or bracket-explicit),
    /// not counting neighboring `[H]` atoms in the graph.
    pub fn attached_hydrogens(&self) -> u8 {
        self.bracket_hydrogens.unwrap_or(self.implicit_hydrogens)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub order: BondOrder,
}

/// A parsed molecular graph. Atom indices are stable and follow the order
/// the atoms appeared in the SMILES string.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Molecule {
    pub(crate) fn assemble(mut atoms: Vec<Atom>, bonds: Vec<Bond>) -> Self {
        let mut doubled_order = vec![0u32; atoms.len()];
        let mut adjacency = vec![Vec::new(); atoms.len()];
        for (bond_index, bond) in bonds.iter().enumerate() {
            doubled_order[bond.a] += bond.order.doubled();
            doubled_order[bond.b] += bond.order.doubled();
            adjacency[bond.a].push((bond.b, bond_index));
            adjacency[bond.b].push((bond.a, bond_index));
        }

        for (atom, doubled) in atoms.iter_mut().zip(&doubled_order) {
            if atom.bracket_hydrogens.is_some() {
                continue;
            }
            let used = doubled.div_ceil(2);
            let valences = atom.element.default_valences();
            // Aromatic atoms never promote to a higher valence state; a
            // substituted aromatic nitrogen carries no hydrogen.
            atom.implicit_hydrogens = if atom.is_aromatic {
                valences
                    .first()
                    .map_or(0, |&v| u32::from(v).saturating_sub(used) as u8)
            } else {
                valences
                    .iter()
                    .copied()
                    .find(|&v| u32::from(v) >= used)
                    .map_or(0, |v| (u32::from(v) - used) as u8)
            };
        }

        Self {
            atoms,
            bonds,
            adjacency,
        }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Neighbors of an atom as `(atom index, bond index)` pairs.
    pub fn neighbors(&self, atom: usize) -> &[(usize, usize)] {
        &self.adjacency[atom]
    }

    pub fn heavy_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.element.is_heavy()).count()
    }

    pub fn aromatic_atom_count(&self) -> usize {
        self.atoms.iter().filter(|a| a.is_aromatic).count()
    }

    /// Number of heavy neighbors of an atom.
    pub fn heavy_degree(&self, atom: usize) -> usize {
        self.adjacency[atom]
            .iter()
            .filter(|(n, _)| self.atoms[*n].element.is_heavy())
            .count()
    }

    /// Total hydrogens on an atom: implicit or bracket-explicit hydrogens
    /// plus neighboring explicit `[H]` atoms.
    pub fn total_hydrogens(&self, atom: usize) -> u8 {
        let graph_h = self.adjacency[atom]
            .iter()
            .filter(|(n, _)| self.atoms[*n].element == Element::H)
            .count() as u8;
        self.atoms[atom].attached_hydrogens() + graph_h
    }

    /// Per-bond ring membership: a bond is in a ring iff it is not a bridge
    /// of the molecular graph.
    pub fn ring_bond_flags(&self) -> Vec<bool> {
        let atom_count = self.atoms.len();
        let mut flags = vec![false; self.bonds.len()];
        if atom_count == 0 {
            return flags;
        }

        let mut discovery = vec![usize::MAX; atom_count];
        let mut low = vec![0usize; atom_count];
        let mut timer = 0usize;

        for start in 0..atom_count {
            if discovery[start] == usize::MAX {
                self.bridge_dfs(start, usize::MAX, &mut discovery, &mut low, &mut timer, &mut flags);
            }
        }

        for flag in &mut flags {
            *flag = !*flag;
        }
        flags
    }

    fn bridge_dfs(
        &self,
        node: usize,
        entry_bond: usize,
        discovery: &mut Vec<usize>,
        low: &mut Vec<usize>,
        timer: &mut usize,
        bridges: &mut Vec<bool>,
    ) {
        discovery[node] = *timer;
        low[node] = *timer;
        *timer += 1;

        for &(next, bond_index) in &self.adjacency[node] {
            if bond_index == entry_bond {
                continue;
            }
            if discovery[next] == usize::MAX {
                self.bridge_dfs(next, bond_index, discovery, low, timer, bridges);
                low[node] = low[node].min(low[next]);
                if low[next] > discovery[node] {
                    bridges[bond_index] = true;
                }
            } else {
                low[node] = low[node].min(discovery[next]);
            }
        }
    }

    /// Per-atom ring membership, derived from ring bonds.
    pub fn ring_atom_flags(&self) -> Vec<bool> {
        let ring_bonds = self.ring_bond_flags();
        let mut flags = vec![false; self.atoms.len()];
        for (bond, in_ring) in self.bonds.iter().zip(&ring_bonds) {
            if *in_ring {
                flags[bond.a] = true;
                flags[bond.b] = true;
            }
        }
        flags
    }
}
