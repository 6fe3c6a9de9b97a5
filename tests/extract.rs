use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::Result;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use confdoc::stage::ExtractStage;

const GFX_SOURCE: &str = "return array(
    'GFX' => array( //graphics settings
        'png_to_gif' => FALSE, // convert pngs
        'undocumented' => TRUE,
    ),
);
";

const MULTI_SECTION_SOURCE: &str = "<?php
return array(
    'GFX' => array( // Image generation
        'image_processing' => 1, // Enables image processing features
        'gdlib' => TRUE, // Enables the gdlib library
        'im_path' => '/usr/bin/', // Path to ImageMagick
        'internal_flag' => 0,
    ),
    'SYS' => array( // System related
        'sitename' => 'New site', // Name of the site
        'caching' => array(), // Caching framework setup
    ),
);
";

struct StageTest {
    dir: TempDir,
}

impl StageTest {
    fn new() -> Result<Self> {
        Ok(StageTest {
            dir: TempDir::new()?,
        })
    }

    fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_confdoc"));
        cmd.current_dir(self.dir.path());
        cmd
    }
}

#[test]
fn test_library_end_to_end() -> Result<()> {
    let test = StageTest::new()?;
    let source = test.write_file("DefaultConfiguration.php", GFX_SOURCE)?;

    let out = ExtractStage::new(&source).transform(None)?;

    assert_eq!(out.text, "# convert pngs\nGFX.png_to_gif=false\n");
    assert_eq!(out.emitted, 1);
    assert_eq!(out.undocumented, 1);
    assert_eq!(out.inconsistent, 0);
    Ok(())
}

#[test]
fn test_multi_section_listing() -> Result<()> {
    let test = StageTest::new()?;
    let source = test.write_file("DefaultConfiguration.php", MULTI_SECTION_SOURCE)?;

    let out = ExtractStage::new(&source).transform(None)?;

    insta::assert_snapshot!(out.text, @r"
    # Enables image processing features
    GFX.image_processing=1
    # Enables the gdlib library
    GFX.gdlib=true
    # Path to ImageMagick
    GFX.im_path=/usr/bin/
    # Name of the site
    SYS.sitename=New site
    ");
    // the documented 'caching' composite and the undocumented flag are
    // both excluded
    assert_eq!(out.composite, 1);
    assert_eq!(out.undocumented, 1);
    Ok(())
}

#[test]
fn test_binary_prints_listing() -> Result<()> {
    let test = StageTest::new()?;
    test.write_file("DefaultConfiguration.php", GFX_SOURCE)?;

    let output = test
        .command()
        .args(["extract", "DefaultConfiguration.php"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "# convert pngs\nGFX.png_to_gif=false\n"
    );
    Ok(())
}

#[test]
fn test_binary_verbose_summary_on_stderr() -> Result<()> {
    let test = StageTest::new()?;
    test.write_file("DefaultConfiguration.php", GFX_SOURCE)?;

    let output = test
        .command()
        .args(["extract", "DefaultConfiguration.php", "--verbose"])
        .output()?;

    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("1 properties extracted"));
    assert!(stderr.contains("1 undocumented entries skipped"));
    // stdout stays clean for piped consumers
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "# convert pngs\nGFX.png_to_gif=false\n"
    );
    Ok(())
}

#[test]
fn test_binary_writes_output_file() -> Result<()> {
    let test = StageTest::new()?;
    test.write_file("DefaultConfiguration.php", GFX_SOURCE)?;

    let output = test
        .command()
        .args([
            "extract",
            "DefaultConfiguration.php",
            "--output",
            "defaults.properties",
        ])
        .output()?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert_eq!(
        fs::read_to_string(test.dir.path().join("defaults.properties"))?,
        "# convert pngs\nGFX.png_to_gif=false\n"
    );
    Ok(())
}

#[test]
fn test_binary_missing_source_exits_with_error() -> Result<()> {
    let test = StageTest::new()?;

    let output = test
        .command()
        .args(["extract", "DoesNotExist.php"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("cannot read configuration source"));
    Ok(())
}

#[test]
fn test_binary_evaluation_error_exits_with_error() -> Result<()> {
    let test = StageTest::new()?;
    test.write_file(
        "Broken.php",
        "return array('SYS' => array('x' => UNDEFINED_CONSTANT));",
    )?;

    let output = test.command().args(["extract", "Broken.php"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("does not evaluate"));
    assert!(stderr.contains("UNDEFINED_CONSTANT"));
    Ok(())
}

#[test]
fn test_binary_uses_config_file_substitutions() -> Result<()> {
    let test = StageTest::new()?;
    test.write_file(
        ".confdocrc.json",
        r#"{ "substitutions": { "MY_LOG_LEVEL": "4" } }"#,
    )?;
    test.write_file(
        "DefaultConfiguration.php",
        "return array(\n'SYS' => array(\n'errorLevel' => MY_LOG_LEVEL, // log threshold\n),\n);\n",
    )?;

    let output = test
        .command()
        .args(["extract", "DefaultConfiguration.php"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "# log threshold\nSYS.errorLevel=4\n"
    );
    Ok(())
}

#[test]
fn test_binary_cache_dir_is_left_clean() -> Result<()> {
    let test = StageTest::new()?;
    test.write_file("DefaultConfiguration.php", GFX_SOURCE)?;
    fs::create_dir(test.dir.path().join("cache"))?;

    let output = test
        .command()
        .args(["extract", "DefaultConfiguration.php", "--cache-dir", "cache"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(fs::read_dir(test.dir.path().join("cache"))?.count(), 0);
    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = StageTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success());

    let content = fs::read_to_string(test.dir.path().join(".confdocrc.json"))?;
    assert!(content.contains("substitutions"));

    // a second init refuses to overwrite
    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
