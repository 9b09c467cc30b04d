//! Compilation tests.

use assert_fs::prelude::*;
use lesscss::{less::ErrorKind, CompileError, CompileOptions, LessCompiler};

const STYLESHEET: &str = r#"// Variables
@base-color: #336699;
@gutter: 10px;
@font-stack: "Helvetica Neue", Arial, sans-serif;
@breakpoint: ~"(max-width: 768px)";

/* Mixins */
.border-radius(@radius: 4px) {
  -webkit-border-radius: @radius;
  border-radius: @radius;
}
.box-shadow(...) {
  box-shadow: @arguments;
}

body {
  font: 14px/1.5 @font-stack;
}
.nav {
  padding: @gutter (@gutter * 2);
  .border-radius;
  > li {
    float: left;
    a { color: @base-color; }
  }
  &.active { .box-shadow(0, 1px, 2px, #000); }
  @media @breakpoint {
    padding: 0;
  }
}
"#;

const EXPECTED: &str = r#"/* Mixins */
body {
  font: 14px/1.5 "Helvetica Neue", Arial, sans-serif;
}
.nav {
  padding: 10px 20px;
  -webkit-border-radius: 4px;
  border-radius: 4px;
}
.nav > li {
  float: left;
}
.nav > li a {
  color: #336699;
}
.nav.active {
  box-shadow: 0 1px 2px #000;
}
@media (max-width: 768px) {
  .nav {
    padding: 0;
  }
}
"#;

#[test]
fn compile_stylesheet() {
    let compiler = LessCompiler::default();

    let result = compiler.compile(STYLESHEET, "style.less").unwrap();

    assert_eq!(result, EXPECTED);
}

#[test]
fn compile_compressed() {
    let compiler = LessCompiler::new(CompileOptions {
        compress: true,
        ..Default::default()
    });

    let result = compiler.compile(STYLESHEET, "style.less").unwrap();

    assert!(!result.contains('\n'));
    assert!(!result.contains("/*"));
    assert!(result.contains(".nav>li a{color:#369}"));
    assert!(result.contains("@media (max-width:768px){.nav{padding:0}}"));
}

#[test]
fn compile_file_with_imports() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;

    dir.child("theme/colors.less")
        .write_str("@link: #0000ff;\n@import \"reset.css\";")?;
    dir.child("theme/index.less")
        .write_str("@import \"colors\";\na { color: @link; }")?;
    dir.child("main.less")
        .write_str("@charset \"UTF-8\";\n@import \"theme/index\";\n")?;

    let compiler = LessCompiler::default();
    let result = compiler.compile_file(dir.child("main.less").path())?;

    assert_eq!(
        result,
        "@charset \"UTF-8\";\n@import \"reset.css\";\na {\n  color: #0000ff;\n}\n"
    );

    Ok(())
}

#[test]
fn errors_are_tagged_by_stage() {
    let compiler = LessCompiler::default();

    let error = compiler.compile("@import \"missing\";", "a.less").unwrap_err();
    assert!(
        matches!(&error, CompileError::Parse(error) if error.kind() == ErrorKind::File),
        "{error:?}"
    );

    let error = compiler.compile(".a { .undefined-mixin; }", "a.less").unwrap_err();
    assert!(
        matches!(&error, CompileError::Render(error) if error.kind() == ErrorKind::Name),
        "{error:?}"
    );

    let error = compiler
        .compile(".m(@a) { width: @a; }\n.a { .m(); }", "a.less")
        .unwrap_err();
    assert!(
        matches!(&error, CompileError::Render(error) if error.kind() == ErrorKind::Argument),
        "{error:?}"
    );
}
