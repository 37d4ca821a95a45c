pub mod descriptors;
pub mod errors;
pub mod model;
pub mod smiles;

pub use descriptors::{descriptors, MolecularDescriptors};
pub use errors::SmilesError;
pub use model::{Atom, Bond, BondOrder, Element, Molecule};
pub use smiles::parse_smiles;

#[cfg(test)]
mod tests;
