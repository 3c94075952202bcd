//! Transformer integration tests.
//!
//! Verifies the text the transformer emits for script passthrough, the XML
//! dialect, class extensions and module rewriting.

use jsxt_diagnostics::{ErrorKind, TranspileError};
use jsxt_parser::{transform, transform_utf16, TransformOptions};

/// Helper: transform with the dialect enabled.
fn jsx(source: &str) -> String {
    match transform(source, "test.jsx", &TransformOptions::default()) {
        Ok(output) => output,
        Err(error) => panic!("transform failed for {:?}: {}", source, error),
    }
}

/// Helper: the error a transform fails with.
fn fail(source: &str) -> TranspileError {
    match transform(source, "test.jsx", &TransformOptions::default()) {
        Ok(output) => panic!("transform of {:?} succeeded with {:?}", source, output),
        Err(error) => error,
    }
}

/// Helper: assert that the source passes through unchanged.
fn assert_unchanged(source: &str) {
    assert_eq!(jsx(source), source, "source: {}", source);
}

fn line_count(text: &str) -> usize {
    text.matches('\n').count()
}

// ============================================================================
// Script passthrough
// ============================================================================

#[test]
fn test_empty_source() {
    assert_eq!(jsx(""), "");
}

#[test]
fn test_plain_script_is_unchanged() {
    assert_unchanged("var a = 1;\nfunction f(x) { return x * 2; }\n");
    assert_unchanged("const o = { a: [1, 2], b: () => { return 3; } };");
    assert_unchanged("a = b / c / d;");
}

#[test]
fn test_comments_are_kept() {
    assert_unchanged("// lead\na; /* mid */ b;\n");
}

#[test]
fn test_comments_removed_keep_lines() {
    let options = TransformOptions {
        jsx: true,
        remove_comments: true,
    };
    let output = transform("a; // c\n/* x\ny */b;", "test.jsx", &options).unwrap();
    assert_eq!(output, "a; \n\nb;");
}

#[test]
fn test_shell_header_is_kept() {
    assert_unchanged("#!/usr/bin/env node\nx = 1;");
}

#[test]
fn test_keywords_as_object_keys() {
    assert_unchanged("x = { class: 1, import: 2, if: 3 };");
}

#[test]
fn test_dynamic_import_and_import_meta() {
    assert_unchanged("import('./lazy').then(f); import.meta.url;");
}

#[test]
fn test_regexp_literals() {
    assert_unchanged("x = /a\\/b[/]/g.test(s);");
    assert_unchanged("if (a) /x/.test(b);");
    assert_unchanged("f(/=/, 1);");
}

#[test]
fn test_template_strings() {
    assert_unchanged("x = `a${b}c`;");
    assert_unchanged("x = `a${ `b${c}` }d`;");
    assert_unchanged("x = `plain`;");
}

#[test]
fn test_less_than_is_not_a_tag_after_operand() {
    assert_unchanged("if (a <b) c();");
    assert_unchanged("x = a<b && c>d;");
}

#[test]
fn test_dialect_disabled_leaves_tags() {
    let options = TransformOptions {
        jsx: false,
        remove_comments: false,
    };
    let output = transform("x = <a>;", "test.js", &options).unwrap();
    assert_eq!(output, "x = <a>;");
}

// ============================================================================
// XML elements
// ============================================================================

#[test]
fn test_element_with_attribute_and_text() {
    assert_eq!(
        jsx("var a = <div class=\"x\">hi</div>;"),
        "var a = {t:0,v:[\"div\",[[[\"class\"],0,\"x\"]],[{t:2,v:\"hi\"}]]};"
    );
}

#[test]
fn test_self_closing_element() {
    assert_eq!(jsx("x = <br/>;"), "x = {t:0,v:[\"br\",[],[]]};");
}

#[test]
fn test_namespaced_element() {
    assert_eq!(jsx("x = <ns:b/>;"), "x = {t:1,v:[\"ns\",\"b\",[],[]]};");
}

#[test]
fn test_component_call() {
    assert_eq!(jsx("x = <vx:Button a=1/>;"), "x = __vx(Button,[[[\"a\"],0,1]]);");
}

#[test]
fn test_boolean_and_dotted_attributes() {
    assert_eq!(
        jsx("x = <a b c.d=1/>;"),
        "x = {t:0,v:[\"a\",[[[\"b\"],0,\"\"],[[\"c\",\"d\"],0,1]],[]]};"
    );
}

#[test]
fn test_attribute_expressions() {
    assert_eq!(
        jsx("x = <a b=this.f(1) c=(d + 1) e=ok ? 1 : 2/>;"),
        "x = {t:0,v:[\"a\",[[[\"b\"],0,this.f(1)],[[\"c\"],0,(d + 1)],[[\"e\"],0,ok ? 1 : 2]],[]]};"
    );
}

#[test]
fn test_arrow_function_attribute() {
    assert_eq!(
        jsx("x = <a onClick=(e) => { go(e); }/>;"),
        "x = {t:0,v:[\"a\",[[[\"onClick\"],0,(e) => { go(e); }]],[]]};"
    );
}

#[test]
fn test_one_shot_data_bind_attribute() {
    assert_eq!(
        jsx("x = <a b=%{c.d}/>;"),
        "x = {t:0,v:[\"a\",[[[\"b\"],2,(ctx)=>{ return (c.d) }]],[]]};"
    );
}

#[test]
fn test_continuous_data_bind_attribute() {
    assert_eq!(
        jsx("x = <a b=%%{c}/>;"),
        "x = {t:0,v:[\"a\",[[[\"b\"],3,{v:(ctx)=>{ return (c) },m:1}]],[]]};"
    );
}

#[test]
fn test_vdata_is_moved_last() {
    assert_eq!(
        jsx("x = <a vdata=1 b=2/>;"),
        "x = {t:0,v:[\"a\",[[[\"b\"],0,2]],[],[[\"vdata\"],0,1]]};"
    );
}

#[test]
fn test_nested_elements_and_text() {
    assert_eq!(
        jsx("x = <a><b/>t</a>;"),
        "x = {t:0,v:[\"a\",[],[{t:0,v:[\"b\",[],[]]},{t:2,v:\"t\"}]]};"
    );
}

#[test]
fn test_interpolated_child() {
    assert_eq!(
        jsx("x = <a>x ${y} z</a>;"),
        "x = {t:0,v:[\"a\",[],[{t:2,v:\"x \"},(y),{t:2,v:\" z\"}]]};"
    );
}

#[test]
fn test_bound_children() {
    assert_eq!(
        jsx("x = <a>%{b}</a>;"),
        "x = {t:0,v:[\"a\",[],[{t:3,v:(ctx)=>{ return (b) }}]]};"
    );
    assert_eq!(
        jsx("x = <a>%%{b}</a>;"),
        "x = {t:0,v:[\"a\",[],[{t:3,v:(ctx)=>{ return (b) },m:1}]]};"
    );
}

#[test]
fn test_text_quotes_are_escaped() {
    assert_eq!(
        jsx("x = <a>say \"hi\"</a>;"),
        "x = {t:0,v:[\"a\",[],[{t:2,v:\"say \\\"hi\\\"\"}]]};"
    );
}

#[test]
fn test_verbatim_text_between_markers() {
    assert_eq!(
        jsx("x = <pre>@@a  b@@</pre>;"),
        "x = {t:0,v:[\"pre\",[],[{t:2,v:\"a  b\"}]]};"
    );
}

#[test]
fn test_blank_text_between_tags_keeps_lines() {
    let source = "x = <a>\n  <b/>\n</a>;";
    let output = jsx(source);
    assert_eq!(output, "x = {t:0,v:[\"a\",[],[\n{t:0,v:[\"b\",[],[]]}\n]]};");
    assert_eq!(line_count(&output), line_count(source));
}

#[test]
fn test_multiline_start_tag_keeps_lines() {
    let source = "x = <a\n  b=1\n>\n</a>;\ny;";
    let output = jsx(source);
    assert_eq!(output, "x = {t:0,v:[\"a\",[\n[[\"b\"],0,1]\n],[\n]]};\ny;");
    assert_eq!(line_count(&output), line_count(source));
}

#[test]
fn test_xml_comments() {
    assert_eq!(jsx("x = <a><!-- c --></a>;"), "x = {t:0,v:[\"a\",[],[/*** c **/]]};");
    assert_eq!(jsx("<!-- a*/b -->\nx;"), "/*** ax/b **/\nx;");

    let options = TransformOptions {
        jsx: true,
        remove_comments: true,
    };
    let output = transform("<!-- note -->\nx;", "test.jsx", &options).unwrap();
    assert_eq!(output, "\nx;");
}

#[test]
fn test_tag_bracket_split_from_operator() {
    assert_eq!(jsx("x = <a>=1</a>;"), "x = {t:0,v:[\"a\",[],[{t:2,v:\"=1\"}]]};");
}

#[test]
fn test_element_as_return_value() {
    assert_eq!(
        jsx("function f() { return <a/>; }"),
        "function f() { return {t:0,v:[\"a\",[],[]]}; }"
    );
}

// ============================================================================
// Classes
// ============================================================================

#[test]
fn test_class_fields_move_to_prototype() {
    assert_eq!(
        jsx("class Foo {\n  a = 1;\n  b() {}\n}"),
        "class Foo {\n  \n  b() {}\n}\nObject.assign(Foo.prototype, {\n  a: 1,\n});"
    );
}

#[test]
fn test_class_field_with_element_initializer() {
    assert_eq!(
        jsx("class Foo {\n  view = <a/>;\n}"),
        "class Foo {\n  \n}\nObject.assign(Foo.prototype, {\n  view: {t:0,v:[\"a\",[],[]]},\n});"
    );
}

#[test]
fn test_class_field_trailing_comment_keeps_separator() {
    let source = "class A {\n a = 1 // one\n ;\n b = 2;\n}";
    let output = jsx(source);
    assert!(
        output.ends_with("}\nObject.assign(A.prototype, {\n  a: 1,\n  b: 2,\n});"),
        "output: {}",
        output
    );
    assert!(!output.contains("// one"));
    assert_eq!(line_count(&output), line_count(source) + 4);
}

#[test]
fn test_class_expression_fields_stay_in_place() {
    assert_unchanged("x = class { a = 1; };");
}

#[test]
fn test_nested_class_fields_stay_in_place() {
    assert_unchanged("function f() { class A { x = 1; } }");
}

#[test]
fn test_class_members_pass_through() {
    assert_unchanged(
        "class A extends B { static s() {} get x() { return 1; } set x(v) {} async *g() {} [k]() {} }",
    );
}

#[test]
fn test_event_members_expand() {
    assert_eq!(
        jsx("class A { event onChange; }"),
        "class A {  get onChange() { return this.getNoticer('Change') }\
         set onChange(func) { this.addDefaultListener('Change', func) }\
         triggerChange(ev,is_ev) { return this.$trigger('Change',ev,is_ev) } }"
    );
}

#[test]
fn test_event_list() {
    let output = jsx("class A { event onA, onB; }");
    assert!(output.contains("get onA()"));
    assert!(output.contains("triggerB(ev,is_ev)"));
}

#[test]
fn test_invalid_event_name() {
    let error = fail("class A { event change; }");
    assert_eq!(error.kind, ErrorKind::InvalidEventName);
    assert!(error.message.contains("change"));
}

#[test]
fn test_missing_field_semicolon() {
    let error = fail("class A { a = 1 }");
    assert_eq!(error.kind, ErrorKind::MissingSemicolon);
}

#[test]
fn test_invalid_accessors() {
    assert_eq!(fail("class A { get x(v) {} }").code, 2006);
    assert_eq!(fail("class A { set x() {} }").code, 2006);
}

// ============================================================================
// Imports
// ============================================================================

#[test]
fn test_default_import() {
    assert_eq!(jsx("import a from 'm';"), "const a = require('m').default;");
}

#[test]
fn test_named_imports() {
    assert_eq!(
        jsx("import { a, b as c } from \"m\";"),
        "const { a, b: c } = require(\"m\");"
    );
}

#[test]
fn test_default_and_named_imports() {
    assert_eq!(
        jsx("import x, { y } from 'm';"),
        "const { default: x, y } = require('m');"
    );
}

#[test]
fn test_namespace_import() {
    assert_eq!(jsx("import * as ns from 'm';"), "const ns = require('m');");
}

#[test]
fn test_bare_imports() {
    assert_eq!(
        jsx("import './test-gui.jsx';"),
        "const test_gui = require('./test-gui.jsx');"
    );
    assert_eq!(jsx("import './1st.js';"), "require('./1st.js');");
    assert_eq!(jsx("import 'm' as q;"), "const q = require('m');");
}

#[test]
fn test_multiline_import_keeps_lines() {
    assert_eq!(
        jsx("import {\n a\n} from 'm';\nx;"),
        "const { a } = require('m')\n\n;\nx;"
    );
}

#[test]
fn test_malformed_import() {
    assert_eq!(fail("import {a b} from 'm';").kind, ErrorKind::MalformedImport);
    assert_eq!(fail("import * from 'm';").kind, ErrorKind::MalformedImport);
}

// ============================================================================
// Exports
// ============================================================================

#[test]
fn test_export_variable() {
    assert_eq!(jsx("export const a = 1;"), "/*export*/ const a = 1;\nexports.a = a;");
}

#[test]
fn test_export_function() {
    assert_eq!(
        jsx("export function foo() {}"),
        "/*export*/ function foo() {}\nexports.foo = foo;"
    );
}

#[test]
fn test_export_default_class() {
    assert_eq!(
        jsx("export default class Foo {}"),
        "/*export*/ class Foo {}\nexports.default = Foo;"
    );
}

#[test]
fn test_export_anonymous_default_function() {
    assert_eq!(jsx("export default function () {}"), "exports.default = function () {}");
}

#[test]
fn test_export_default_expression() {
    assert_eq!(jsx("export default a + 1;"), "exports.default = a + 1;");
}

#[test]
fn test_export_list() {
    assert_eq!(jsx("export {a, b};"), "module._export = {a, b};");
}

#[test]
fn test_export_all() {
    assert_eq!(
        jsx("export * from './m';"),
        "Object.assign(exports, require('./m'));"
    );
}

#[test]
fn test_exported_class_fields_attach_before_exports() {
    assert_eq!(
        jsx("export class Foo { a = 1; }"),
        "/*export*/ class Foo {  }\nObject.assign(Foo.prototype, {\n  a: 1,\n});\nexports.Foo = Foo;"
    );
}

#[test]
fn test_duplicate_default_export() {
    let error = fail("export default a;\nexport default b;");
    assert_eq!(error.kind, ErrorKind::DuplicateDefaultExport);
    assert_eq!(error.line, 2);
}

#[test]
fn test_malformed_export() {
    assert_eq!(fail("export class {}").kind, ErrorKind::MalformedExport);
    assert_eq!(fail("export function () {}").kind, ErrorKind::MalformedExport);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_mismatched_closing_tag() {
    let error = fail("a;\nb;\nx = <a></b>;");
    assert_eq!(error.kind, ErrorKind::MismatchedClosingTag);
    assert_eq!(error.line, 3);
    assert_eq!(error.path, "test.jsx");
}

#[test]
fn test_missing_closing_tag() {
    assert_eq!(fail("x = <a>").kind, ErrorKind::UnterminatedElement);
}

#[test]
fn test_duplicate_attribute() {
    assert_eq!(fail("x = <a b=1 b=2/>;").kind, ErrorKind::DuplicateAttribute);
}

#[test]
fn test_component_children() {
    assert_eq!(fail("x = <vx:B></vx:B>;").kind, ErrorKind::ComponentChildren);
}

#[test]
fn test_attributes_need_whitespace() {
    assert_eq!(fail("x = <a b=\"x\"c=2/>;").code, 3005);
}

#[test]
fn test_element_in_attribute() {
    assert_eq!(fail("x = <a b=<c/>/>;").code, 3006);
}

#[test]
fn test_unexpected_end_of_source() {
    assert_eq!(fail("x = (1").kind, ErrorKind::UnexpectedEndOfSource);
}

#[test]
fn test_unexpected_closer() {
    assert_eq!(fail("x = 1);").kind, ErrorKind::UnexpectedToken);
}

#[test]
fn test_lexical_errors_surface() {
    assert_eq!(fail("x = 'abc").kind, ErrorKind::UnterminatedString);
    assert_eq!(fail("x = 3abc;").kind, ErrorKind::MalformedNumber);
}

#[test]
fn test_nesting_too_deep() {
    let source = "(".repeat(600);
    assert_eq!(fail(&source).code, 2008);
}

#[test]
fn test_transform_output_is_a_fixed_point() {
    let sources = [
        "class Foo {\n  a = 1;\n  b = <b/>;\n  c() {}\n}",
        "x = <div id=\"main\" title=%{t}>\n  hello ${name}\n  <span a.b=1/>\n</div>;",
        "x = <a b=%%{c}>%%{d}</a>;",
    ];
    for source in sources {
        let once = jsx(source);
        assert_eq!(jsx(&once), once, "source: {}", source);
    }
}

#[test]
fn test_nested_single_statement_ifs_too_deep() {
    let source = format!("{}x;", "if (a) ".repeat(3_000));
    assert_eq!(fail(&source).code, 2008);

    let shallow = format!("{}x;", "if (a) ".repeat(50));
    assert_unchanged(&shallow);
}

#[test]
fn test_stray_closing_tag_is_named_in_error() {
    let error = fail("x = </a>;");
    assert_eq!(error.kind, ErrorKind::UnexpectedToken);
    assert!(error.message.contains("'</a>'"), "message: {}", error.message);
}

// ============================================================================
// UTF-16 entry point
// ============================================================================

#[test]
fn test_transform_utf16() {
    let source: Vec<u16> = "x = <a>é</a>;".encode_utf16().collect();
    let output = transform_utf16(&source, "test.jsx", &TransformOptions::default()).unwrap();
    assert_eq!(
        String::from_utf16(&output).unwrap(),
        "x = {t:0,v:[\"a\",[],[{t:2,v:\"é\"}]]};"
    );
}
