//! The edge subsystem: everything that inserts, queries, splits, heals or
//! removes an edge. Split into one file per concern rather than one large
//! module, since each operation has its own largely independent collaborator.

mod add;
mod adjacent;
mod heal;
mod query;
mod remove;
mod split;
mod validate;

pub use add::{add_edge_mod_face, add_edge_new_faces, add_iso_edge};
pub use heal::{mod_edge_heal, new_edge_heal, new_edges_split};
pub use query::{get_edge_by_node, get_edge_by_point, get_edges_by_line};
pub use remove::{rem_edge_mod_face, rem_edge_new_face};
pub use split::mod_edge_split;
pub use validate::validate_crossing;
