use std::fs::{create_dir_all, write};

use axis_merger::MergeConfig;
use crispy_fonts_cli::commands::{MeasureOptions, extract, measure, merge_axes};
use designspace::DesignSpace;
use width_inspector::OutputFormat;

#[test]
fn extract_writes_requested_output() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("Vazirmatn[wght].ttf");
    write(&font, font_test_data::VAZIRMATN_VAR).unwrap();
    let output = dir.path().join("Vazirmatn.designspace");

    let written = extract(&font, Some(&output)).unwrap();
    assert_eq!(written, output);
    assert_eq!(DesignSpace::load(&output).unwrap().axes[0].name, "Weight");
}

#[test]
fn extract_reports_static_fonts() {
    let dir = tempfile::tempdir().unwrap();
    let font = dir.path().join("Simple.ttf");
    write(&font, font_test_data::SIMPLE_GLYF).unwrap();

    let err = extract(&font, Some(&dir.path().join("out.designspace"))).unwrap_err();
    assert!(format!("{err:#}").contains("not a variable font"));
}

#[test]
fn merge_axes_with_custom_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    create_dir_all(root.join("masters/Crispy-Regular.ufo")).unwrap();
    write(root.join("axes.csv"), "Style,Contrast-e\nRegular,10\nBold,30\n").unwrap();
    write(
        root.join("Crispy.designspace"),
        r#"<designspace format="5.0">
  <axes>
    <axis tag="wght" name="Weight" minimum="400" maximum="700" default="400"/>
  </axes>
  <sources>
    <source filename="masters/Crispy-Regular.ufo" stylename="Regular">
      <location><dimension name="Weight" xvalue="400"/></location>
    </source>
  </sources>
  <instances>
    <instance stylename="Bold"><location><dimension name="Weight" xvalue="700"/></location></instance>
  </instances>
</designspace>
"#,
    )
    .unwrap();

    let config = MergeConfig {
        csv: root.join("axes.csv"),
        designspace: root.join("Crispy.designspace"),
        master_dir: root.join("masters"),
        output_dir: root.join("masters"),
        output: root.join("Crispy-updated.designspace"),
        instance_column: "Style".into(),
        ..MergeConfig::default()
    };
    let summary = merge_axes(config).unwrap();
    assert_eq!(summary.sources_duplicated, ["masters/Crispy-Regular-Contrast-eMax.ufo"]);

    let doc = DesignSpace::load(root.join("Crispy-updated.designspace")).unwrap();
    assert_eq!(doc.instances[0].location.get("Contrast-e"), Some(&30.0));
    assert!(root.join("masters/Crispy-Regular-Contrast-eMax.ufo").is_dir());
}

#[test]
fn measure_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let options = MeasureOptions {
        source: dir.path().join("absent.glyphs"),
        text: "H".into(),
        compiler: "true".into(),
        format: OutputFormat::Otf,
        export_dir: dir.path().join("export"),
    };
    assert!(measure(&options).unwrap_err().to_string().contains("File not found"));
}

#[cfg(unix)]
#[test]
fn measure_with_stand_in_compiler() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("Crispy.designspace");
    write(&source, "<designspace/>").unwrap();
    let export_dir = dir.path().join("export");

    let options = MeasureOptions {
        source,
        text: "".into(),
        compiler: "true".into(),
        format: OutputFormat::Otf,
        export_dir: export_dir.clone(),
    };
    let report = measure(&options).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.text, "H");
    assert!(!export_dir.exists());
}
