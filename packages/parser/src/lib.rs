pub mod ast;
pub mod entities;
pub mod error;
pub mod id_generator;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod query;
pub mod serializer;
pub mod tags;

pub use ast::{Attribute, Content, Element, Fragment, NodePath, DATA_SOURCE_ATTR, NODE_ID_ATTR};
pub use error::{ParseError, ParseResult};
pub use id_generator::{new_node_id, new_prefixed_id, IDGenerator};
pub use node::{parse, parse_with_generator, parse_with_ids, serialize_nodes, Node, ParseOutput};
pub use parser::{parse_fragment, Parser, MAX_DEPTH};
pub use query::{ancestor_path, find_node_by_id, is_descendant_of};
pub use serializer::{serialize, serialize_element, Serializer};
pub use tags::{
    can_bind_field, can_have_children, is_bindable_tag, is_document_wrapper, is_editable_tag,
    is_image_tag, is_void,
};
