// @generated
// This file wires up buf-generated protobuf code

pub mod usuario {
    include!("usuario.rs");
    include!("usuario.tonic.rs");
}
