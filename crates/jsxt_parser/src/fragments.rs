//! Fixed output text.
//!
//! Every synthesized piece of output comes from here. The table is plain
//! `const` data, so concurrent transforms share it without coordination.

// Modules
pub const REQUIRE_OPEN: &str = "require(";
pub const DEFAULT_MEMBER: &str = ".default";
pub const CONST_DECL: &str = "const ";
pub const BIND_EQ: &str = " = ";
pub const EXPORT_MARKER: &str = "/*export*/";
pub const EXPORTS_PREFIX: &str = "exports.";
pub const EXPORTS_DEFAULT: &str = "exports.default";
pub const MODULE_EXPORT: &str = "module._export";
pub const REEXPORT_ALL_OPEN: &str = "Object.assign(exports, ";

// Deferred class members
pub const ATTACH_MEMBERS_OPEN: &str = "Object.assign(";
pub const PROTOTYPE_OPEN: &str = ".prototype, {\n";
pub const MEMBER_INDENT: &str = "  ";
pub const ATTACH_MEMBERS_CLOSE: &str = "});";

// Events
pub const EVENT_PREFIX: &str = "on";
pub const EVENT_GETTER_OPEN: &str = "get on";
pub const EVENT_GETTER_BODY: &str = "() { return this.getNoticer('";
pub const EVENT_SETTER_OPEN: &str = "') }set on";
pub const EVENT_SETTER_BODY: &str = "(func) { this.addDefaultListener('";
pub const EVENT_TRIGGER_OPEN: &str = "', func) }trigger";
pub const EVENT_TRIGGER_BODY: &str = "(ev,is_ev) { return this.$trigger('";
pub const EVENT_TRIGGER_CLOSE: &str = "',ev,is_ev) }";

// XML
pub const COMPONENT_MARKER: &str = "vx";
pub const COMPONENT_CALL_OPEN: &str = "__vx(";
pub const VDATA: &str = "vdata";
pub const ELEMENT_OPEN: &str = "{t:0,v:[";
pub const NAMESPACED_ELEMENT_OPEN: &str = "{t:1,v:[";
pub const ELEMENT_CLOSE: &str = "]}";
pub const TEXT_NODE_OPEN: &str = "{t:2,v:\"";
pub const TEXT_NODE_CLOSE: &str = "\"}";
pub const BOUND_NODE_OPEN: &str = "{t:3,v:";
pub const CONTINUOUS_VALUE_OPEN: &str = "{v:";
pub const MULTIPLE_MARKER: &str = ",m:1";
pub const BIND_FUNCTION_OPEN: &str = "(ctx)=>{ return (";
pub const BIND_FUNCTION_CLOSE: &str = ") }";
pub const BINDING_PLAIN: &str = "0,";
pub const BINDING_ONCE: &str = "2,";
pub const BINDING_CONTINUOUS: &str = "3,";
pub const EMPTY_STRING: &str = "\"\"";
pub const EMPTY_CHILDREN: &str = ",[]";
pub const XML_COMMENT_OPEN: &str = "/***";
pub const XML_COMMENT_CLOSE: &str = "**/";
