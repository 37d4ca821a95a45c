use crate::descriptors::{
    aromatic_proportion, descriptors, h_acceptor_count, h_donor_count, molecular_weight,
    rotatable_bond_count,
};
use crate::errors::SmilesError;
use crate::model::{BondOrder, Element};
use crate::parse_smiles;

#[test]
fn parses_ethanol() {
    let mol = parse_smiles("CCO").expect("ethanol parse failed");
    assert_eq!(mol.atom_count(), 3);
    assert_eq!(mol.bonds().len(), 2);
    assert_eq!(mol.atoms()[0].implicit_hydrogens, 3);
    assert_eq!(mol.atoms()[1].implicit_hydrogens, 2);
    assert_eq!(mol.atoms()[2].implicit_hydrogens, 1);
}

#[test]
fn parses_benzene_as_aromatic_ring() {
    let mol = parse_smiles("c1ccccc1").expect("benzene parse failed");
    assert_eq!(mol.atom_count(), 6);
    assert_eq!(mol.bonds().len(), 6);
    assert!(mol.atoms().iter().all(|a| a.is_aromatic));
    assert!(mol
        .bonds()
        .iter()
        .all(|b| b.order == BondOrder::Aromatic));
    assert!(mol.atoms().iter().all(|a| a.implicit_hydrogens == 1));
    assert!(mol.ring_bond_flags().iter().all(|f| *f));
}

#[test]
fn parses_branches_and_double_bonds() {
    // Acetic acid: C, carboxyl C, =O, -OH.
    let mol = parse_smiles("CC(=O)O").expect("acetic acid parse failed");
    assert_eq!(mol.atom_count(), 4);
    let double = mol
        .bonds()
        .iter()
        .filter(|b| b.order == BondOrder::Double)
        .count();
    assert_eq!(double, 1);
    assert_eq!(mol.atoms()[3].implicit_hydrogens, 1);
}

#[test]
fn parses_percent_ring_labels() {
    let chain_with_ring = parse_smiles("C%10CCC%10").expect("%nn ring parse failed");
    assert_eq!(chain_with_ring.atom_count(), 4);
    assert_eq!(chain_with_ring.bonds().len(), 4);
    assert!(chain_with_ring.ring_bond_flags().iter().all(|f| *f));
}

#[test]
fn parses_bracket_atoms() {
    let mol = parse_smiles("[NH4+]").expect("ammonium parse failed");
    assert_eq!(mol.atoms()[0].element, Element::N);
    assert_eq!(mol.atoms()[0].formal_charge, 1);
    assert_eq!(mol.atoms()[0].attached_hydrogens(), 4);

    let anion = parse_smiles("CC(=O)[O-]").expect("acetate parse failed");
    assert_eq!(anion.atoms()[3].formal_charge, -1);
    assert_eq!(anion.atoms()[3].attached_hydrogens(), 0);

    let pyrrole = parse_smiles("c1cc[nH]1").expect("azete-like parse failed");
    assert_eq!(pyrrole.atoms()[3].element, Element::N);
    assert!(pyrrole.atoms()[3].is_aromatic);
    assert_eq!(pyrrole.atoms()[3].attached_hydrogens(), 1);
}

#[test]
fn parses_disconnected_fragments() {
    let salt = parse_smiles("[Na+].[Cl-]").expect("salt parse failed");
    assert_eq!(salt.atom_count(), 2);
    assert!(salt.bonds().is_empty());
}

#[test]
fn rejects_garbage() {
    assert!(matches!(
        parse_smiles("invalid_garbage"),
        Err(SmilesError::UnexpectedCharacter { .. })
    ));
    assert!(matches!(parse_smiles(""), Err(SmilesError::Empty)));
    assert!(matches!(
        parse_smiles("C1CC"),
        Err(SmilesError::OpenRingBond { label: 1 })
    ));
    assert!(matches!(
        parse_smiles("C(C"),
        Err(SmilesError::UnbalancedBranch)
    ));
    assert!(matches!(
        parse_smiles("CC="),
        Err(SmilesError::DanglingBond)
    ));
    assert!(matches!(
        parse_smiles("[Xx]"),
        Err(SmilesError::UnknownElement { .. })
    ));
    assert!(matches!(
        parse_smiles("[CH"),
        Err(SmilesError::UnterminatedBracket { .. })
    ));
}

#[test]
fn ethanol_molecular_weight() {
    let mol = parse_smiles("CCO").unwrap();
    assert!((molecular_weight(&mol) - 46.069).abs() < 0.01);
}

#[test]
fn water_descriptor_set() {
    let mol = parse_smiles("O").unwrap();
    let d = descriptors(&mol);
    assert!((d.mol_wt - 18.015).abs() < 0.01);
    assert_eq!(d.h_donors, 1.0);
    assert_eq!(d.h_acceptors, 1.0);
    assert_eq!(d.rotatable_bonds, 0.0);
    assert_eq!(d.aromatic_proportion, Some(0.0));
}

#[test]
fn benzene_is_fully_aromatic() {
    let mol = parse_smiles("c1ccccc1").unwrap();
    assert_eq!(aromatic_proportion(&mol), Some(1.0));
    assert!((molecular_weight(&mol) - 78.114).abs() < 0.01);
}

#[test]
fn toluene_aromatic_proportion() {
    let mol = parse_smiles("Cc1ccccc1").unwrap();
    let proportion = aromatic_proportion(&mol).expect("proportion undefined");
    assert!((proportion - 6.0 / 7.0).abs() < 1e-12);
}

#[test]
fn zero_heavy_atom_molecule_has_zero_proportion() {
    let mol = parse_smiles("[H][H]").unwrap();
    assert_eq!(mol.heavy_atom_count(), 0);
    assert_eq!(aromatic_proportion(&mol), Some(0.0));
    assert!((molecular_weight(&mol) - 2.016).abs() < 0.01);
}

#[test]
fn rotatable_bonds_ignore_terminal_and_ring_bonds() {
    // Ethanol: both bonds end in a terminal heavy atom.
    assert_eq!(rotatable_bond_count(&parse_smiles("CCO").unwrap()), 0);
    // Butane: only the central C-C bond rotates.
    assert_eq!(rotatable_bond_count(&parse_smiles("CCCC").unwrap()), 1);
    // Cyclohexane: all bonds are ring bonds.
    assert_eq!(rotatable_bond_count(&parse_smiles("C1CCCCC1").unwrap()), 0);
    // Aspirin has three rotatable bonds.
    let aspirin = parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
    assert_eq!(rotatable_bond_count(&aspirin), 3);
}

#[test]
fn triple_bond_neighbors_are_not_rotatable() {
    // Propionitrile: the C-C#N bond is excluded.
    assert_eq!(rotatable_bond_count(&parse_smiles("CCC#N").unwrap()), 0);
}

#[test]
fn aspirin_donor_acceptor_counts() {
    let aspirin = parse_smiles("CC(=O)Oc1ccccc1C(=O)O").unwrap();
    assert_eq!(h_donor_count(&aspirin), 1);
    assert_eq!(h_acceptor_count(&aspirin), 4);
}

#[test]
fn caffeine_has_no_donors() {
    let caffeine = parse_smiles("Cn1cnc2c1c(=O)n(C)c(=O)n2C").unwrap();
    assert_eq!(h_donor_count(&caffeine), 0);
    assert_eq!(h_acceptor_count(&caffeine), 6);
}

#[test]
fn log_p_tracks_hydrophobicity() {
    let hexane = descriptors(&parse_smiles("CCCCCC").unwrap());
    let glycerol = descriptors(&parse_smiles("OCC(O)CO").unwrap());
    assert!(hexane.log_p > 1.0, "hexane logP = {}", hexane.log_p);
    assert!(glycerol.log_p < 0.0, "glycerol logP = {}", glycerol.log_p);
    assert!(hexane.log_p > glycerol.log_p);
}

#[test]
fn fused_ring_bonds_are_all_in_rings() {
    let naphthalene = parse_smiles("c1ccc2ccccc2c1").unwrap();
    assert_eq!(naphthalene.atom_count(), 10);
    assert!(naphthalene.ring_bond_flags().iter().all(|f| *f));
    assert_eq!(aromatic_proportion(&naphthalene), Some(1.0));
}
