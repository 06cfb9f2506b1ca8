//! Tree construction tests in the html5lib dump format.
//!
//! Each case parses a document and compares the tree, rendered with
//! `Document::to_test_format`, line by line.

use marten_html::{ParseOptions, parse_str};

fn assert_tree_with(html: &str, options: &ParseOptions, expected: &[&str]) {
    let output = parse_str(html, options);
    let actual = output.document.to_test_format();
    let actual: Vec<&str> = actual.lines().collect();
    assert_eq!(actual, expected, "tree for {html:?}");
}

fn assert_tree(html: &str, expected: &[&str]) {
    assert_tree_with(html, &ParseOptions::default(), expected);
}

#[test]
fn test_empty_document() {
    assert_tree("", &["| <html>", "|   <head>", "|   <body>"]);
}

#[test]
fn test_simple_document() {
    assert_tree(
        "<!DOCTYPE html><title>x</title><p>a",
        &[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|     <title>",
            "|       \"x\"",
            "|   <body>",
            "|     <p>",
            "|       \"a\"",
        ],
    );
}

#[test]
fn test_unclosed_formatting_element() {
    assert_tree(
        "<p>Hello<b>world",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"Hello\"",
            "|       <b>",
            "|         \"world\"",
        ],
    );
}

#[test]
fn test_adoption_agency_with_furthest_block() {
    assert_tree(
        "<b>1<i>2<p>3</b>4</p>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <b>",
            "|       \"1\"",
            "|       <i>",
            "|         \"2\"",
            "|     <i>",
            "|       <p>",
            "|         <b>",
            "|           \"3\"",
            "|         \"4\"",
        ],
    );
}

#[test]
fn test_adoption_agency_moves_block_out_of_formatting() {
    assert_tree(
        "<b><p>x</b>y",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <b>",
            "|     <p>",
            "|       <b>",
            "|         \"x\"",
            "|       \"y\"",
        ],
    );
}

#[test]
fn test_nested_anchor_closes_the_first() {
    assert_tree(
        "<a href=1>x<a href=2>y",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <a>",
            "|       href=\"1\"",
            "|       \"x\"",
            "|     <a>",
            "|       href=\"2\"",
            "|       \"y\"",
        ],
    );
}

#[test]
fn test_block_closes_paragraph() {
    assert_tree(
        "<p>a<div>b</div>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"a\"",
            "|     <div>",
            "|       \"b\"",
        ],
    );
}

#[test]
fn test_list_items_close_each_other() {
    assert_tree(
        "<ul><li>a<li>b</ul>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <ul>",
            "|       <li>",
            "|         \"a\"",
            "|       <li>",
            "|         \"b\"",
        ],
    );
}

#[test]
fn test_headings_do_not_nest() {
    assert_tree(
        "<h1><h2>x",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <h1>",
            "|     <h2>",
            "|       \"x\"",
        ],
    );
}

#[test]
fn test_end_br_becomes_br_element() {
    assert_tree(
        "a</br>b",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     \"a\"",
            "|     <br>",
            "|     \"b\"",
        ],
    );
}

#[test]
fn test_image_is_renamed_to_img() {
    assert_tree(
        "<image src=x>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <img>",
            "|       src=\"x\"",
        ],
    );
}

#[test]
fn test_duplicate_html_start_tag_merges_attributes() {
    assert_tree(
        "<html lang=en><html class=x lang=fr>",
        &[
            "| <html>",
            "|   class=\"x\"",
            "|   lang=\"en\"",
            "|   <head>",
            "|   <body>",
        ],
    );
}

#[test]
fn test_comment_after_html_goes_to_document() {
    assert_tree(
        "<p>a</p></body></html><!--c-->",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"a\"",
            "| <!-- c -->",
        ],
    );
}

#[test]
fn test_script_in_head() {
    assert_tree(
        "<script>a<b</script>",
        &[
            "| <html>",
            "|   <head>",
            "|     <script>",
            "|       \"a<b\"",
            "|   <body>",
        ],
    );
}

#[test]
fn test_table_gets_implied_tbody() {
    assert_tree(
        "<table><tr><td>1</td></tr></table>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <table>",
            "|       <tbody>",
            "|         <tr>",
            "|           <td>",
            "|             \"1\"",
        ],
    );
}

#[test]
fn test_text_in_table_is_foster_parented() {
    assert_tree(
        "<table>text</table>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     \"text\"",
            "|     <table>",
        ],
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    assert_tree(
        "<table> <tr></tr></table>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <table>",
            "|       \" \"",
            "|       <tbody>",
            "|         <tr>",
        ],
    );
}

#[test]
fn test_element_in_table_is_foster_parented() {
    assert_tree(
        "<table><div>x</div><tr><td>y</td></tr></table>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <div>",
            "|       \"x\"",
            "|     <table>",
            "|       <tbody>",
            "|         <tr>",
            "|           <td>",
            "|             \"y\"",
        ],
    );
}

#[test]
fn test_select_options_close_each_other() {
    assert_tree(
        "<select><option>a<option>b</select>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <select>",
            "|       <option>",
            "|         \"a\"",
            "|       <option>",
            "|         \"b\"",
        ],
    );
}

#[test]
fn test_paragraph_and_table_in_quirks_mode() {
    assert_tree(
        "<p><table>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       <table>",
        ],
    );
    assert_tree(
        "<!DOCTYPE html><p><table>",
        &[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|     <table>",
        ],
    );
}

#[test]
fn test_template_contents() {
    assert_tree(
        "<template><tr><td>a</td></tr></template>",
        &[
            "| <html>",
            "|   <head>",
            "|     <template>",
            "|       <tr>",
            "|         <td>",
            "|           \"a\"",
            "|   <body>",
        ],
    );
}

#[test]
fn test_template_in_table_holds_rows_and_flow_content() {
    assert_tree(
        "<table><template><tr><div>x",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <table>",
            "|       <template>",
            "|         <tr>",
            "|         <div>",
            "|           \"x\"",
        ],
    );
}

#[test]
fn test_nobr_restarts_inside_open_nobr() {
    assert_tree(
        "<nobr>a<nobr>b",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <nobr>",
            "|       \"a\"",
            "|     <nobr>",
            "|       \"b\"",
        ],
    );
}

#[test]
fn test_frameset() {
    assert_tree(
        "<frameset><frame></frameset>",
        &[
            "| <html>",
            "|   <head>",
            "|   <frameset>",
            "|     <frame>",
        ],
    );
}

#[test]
fn test_noscript_with_scripting_disabled() {
    assert_tree(
        "<noscript><p>x</p></noscript>",
        &[
            "| <html>",
            "|   <head>",
            "|     <noscript>",
            "|   <body>",
            "|     <p>",
            "|       \"x\"",
        ],
    );
}

#[test]
fn test_noscript_with_scripting_enabled() {
    assert_tree_with(
        "<noscript><p>x</p></noscript>",
        &ParseOptions::default().with_scripting(true),
        &[
            "| <html>",
            "|   <head>",
            "|     <noscript>",
            "|       \"<p>x</p>\"",
            "|   <body>",
        ],
    );
}

#[test]
fn test_svg_foreign_object() {
    assert_tree(
        "<svg><foreignObject><p>hi</p></foreignObject></svg>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       <svg foreignObject>",
            "|         <p>",
            "|           \"hi\"",
        ],
    );
}

#[test]
fn test_svg_attribute_case_is_restored() {
    assert_tree(
        r##"<svg viewbox="0 0 1 1"><use xlink:href="#a"/></svg>"##,
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       viewBox=\"0 0 1 1\"",
            "|       <svg use>",
            "|         xlink href=\"#a\"",
        ],
    );
}

#[test]
fn test_html_start_tag_breaks_out_of_svg() {
    assert_tree(
        "<svg><p>x",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|     <p>",
            "|       \"x\"",
        ],
    );
}

#[test]
fn test_mathml_integration_points() {
    assert_tree(
        r#"<math><mi>x</mi><annotation-xml encoding="text/html"><div>y</div></annotation-xml></math>"#,
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <math math>",
            "|       <math mi>",
            "|         \"x\"",
            "|       <math annotation-xml>",
            "|         encoding=\"text/html\"",
            "|         <div>",
            "|           \"y\"",
        ],
    );
}

#[test]
fn test_cdata_in_svg_is_text() {
    assert_tree(
        "<svg><![CDATA[a<b]]></svg>",
        &[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       \"a<b\"",
        ],
    );
}
