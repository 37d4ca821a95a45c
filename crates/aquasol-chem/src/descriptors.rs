use crate::model::{BondOrder, Element, Molecule};

/// The descriptor set consumed by the solubility model.
///
/// `aromatic_proportion` is optional: the field is reported as missing when
/// it cannot be computed, and downstream filtering decides what to do with
/// the record. For a molecule with no heavy atoms the proportion is 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MolecularDescriptors {
    pub mol_wt: f64,
    pub log_p: f64,
    pub rotatable_bonds: f64,
    pub h_donors: f64,
    pub h_acceptors: f64,
    pub aromatic_proportion: Option<f64>,
}

/// Computes the full descriptor set for a molecule.
pub fn descriptors(mol: &Molecule) -> MolecularDescriptors {
    MolecularDescriptors {
        mol_wt: molecular_weight(mol),
        log_p: crippen_log_p(mol),
        rotatable_bonds: rotatable_bond_count(mol) as f64,
        h_donors: h_donor_count(mol) as f64,
        h_acceptors: h_acceptor_count(mol) as f64,
        aromatic_proportion: aromatic_proportion(mol),
    }
}

/// Average molecular weight: every atom plus its attached hydrogens.
pub fn molecular_weight(mol: &Molecule) -> f64 {
    let hydrogen = Element::H.atomic_weight();
    mol.atoms()
        .iter()
        .map(|atom| atom.element.atomic_weight() + f64::from(atom.attached_hydrogens()) * hydrogen)
        .sum()
}

/// Wildman-Crippen style logP estimate from per-atom contributions.
pub fn crippen_log_p(mol: &Molecule) -> f64 {
    let ring_atoms = mol.ring_atom_flags();
    let mut log_p = 0.0;

    for (index, atom) in mol.atoms().iter().enumerate() {
        if atom.element == Element::H {
            continue;
        }

        let heavy_degree = mol.heavy_degree(index);
        let has_double = mol
            .neighbors(index)
            .iter()
            .any(|&(_, b)| mol.bonds()[b].order == BondOrder::Double);
        let has_hetero_neighbor = mol.neighbors(index).iter().any(|&(n, _)| {
            let e = mol.atoms()[n].element;
            e.is_heavy() && e != Element::C
        });

        log_p += match atom.element {
            Element::C => {
                if atom.is_aromatic {
                    if has_hetero_neighbor {
                        -0.14
                    } else {
                        0.296
                    }
                } else if has_double {
                    if has_hetero_neighbor {
                        -0.03
                    } else {
                        0.08
                    }
                } else if ring_atoms[index] || heavy_degree <= 2 {
                    0.1441
                } else if heavy_degree == 3 {
                    0.0
                } else {
                    -0.04
                }
            }
            Element::N => {
                if atom.is_aromatic {
                    -0.3187
                } else if atom.formal_charge > 0 {
                    -1.0190
                } else if has_double {
                    -0.5262
                } else {
                    -0.4458
                }
            }
            Element::O => {
                if atom.formal_charge < 0 {
                    -1.189
                } else if has_double {
                    -0.3339
                } else if heavy_degree >= 2 {
                    -0.2893
                } else {
                    -0.3567
                }
            }
            Element::S => {
                if has_double {
                    -0.1084
                } else if atom.formal_charge != 0 {
                    -0.5188
                } else {
                    0.6237
                }
            }
            Element::F => 0.4118,
            Element::Cl => 0.6895,
            Element::Br => 0.8813,
            Element::I => 1.050,
            Element::P => 0.2836,
            _ => 0.0,
        };

        // Hydrogen contributions depend on what they are attached to.
        let h_count = f64::from(mol.total_hydrogens(index));
        log_p += if atom.element == Element::C {
            h_count * 0.1230
        } else {
            h_count * -0.2677
        };
    }

    log_p
}

/// Non-ring single bonds between non-terminal heavy atoms, excluding bonds
/// next to a triple bond.
pub fn rotatable_bond_count(mol: &Molecule) -> usize {
    let ring_bonds = mol.ring_bond_flags();
    let atom_count = mol.atom_count();

    let mut next_to_triple = vec![false; atom_count];
    for bond in mol.bonds() {
        if bond.order == BondOrder::Triple {
            next_to_triple[bond.a] = true;
            next_to_triple[bond.b] = true;
        }
    }

    mol.bonds()
        .iter()
        .zip(&ring_bonds)
        .filter(|(bond, in_ring)| {
            !**in_ring
                && bond.order == BondOrder::Single
                && mol.atoms()[bond.a].element.is_heavy()
                && mol.atoms()[bond.b].element.is_heavy()
                && mol.heavy_degree(bond.a) >= 2
                && mol.heavy_degree(bond.b) >= 2
                && !next_to_triple[bond.a]
                && !next_to_triple[bond.b]
        })
        .count()
}

/// Hydrogen-bond donors: N or O atoms carrying at least one hydrogen.
pub fn h_donor_count(mol: &Molecule) -> usize {
    mol.atoms()
        .iter()
        .enumerate()
        .filter(|(i, atom)| {
            matches!(atom.element, Element::N | Element::O) && mol.total_hydrogens(*i) > 0
        })
        .count()
}

/// Hydrogen-bond acceptors: every N and O atom (Lipinski convention).
pub fn h_acceptor_count(mol: &Molecule) -> usize {
    mol.atoms()
        .iter()
        .filter(|atom| matches!(atom.element, Element::N | Element::O))
        .count()
}

/// Fraction of heavy atoms that are aromatic; 0 for a molecule with no
/// heavy atoms.
pub fn aromatic_proportion(mol: &Molecule) -> Option<f64> {
    let heavy = mol.heavy_atom_count();
    if heavy == 0 {
        return Some(0.0);
    }
    let ratio = mol.aromatic_atom_count() as f64 / heavy as f64;
    ratio.is_finite().then_some(ratio)
}
