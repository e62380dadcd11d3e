use super::*;
use crate::model::chart::Dataset;

fn spec(kind: ChartKind, labels: &[&str], data: &[f64]) -> ChartSpec {
    ChartSpec {
        kind,
        title: "Kết quả khảo sát".to_string(),
        labels: labels.iter().map(|s| s.to_string()).collect(),
        datasets: vec![Dataset {
            label: "Số lượng".to_string(),
            data: data.to_vec(),
        }],
    }
}

#[test]
fn y_axis_adds_ten_percent_headroom() {
    // 20 * 1.1 = 22
    assert_eq!(y_axis_max(&[15.0, 20.0, 5.0]), 22.0);
    assert_eq!(y_axis_max(&[100.0]), 110.0);
}

#[test]
fn y_axis_falls_back_to_ten() {
    assert_eq!(y_axis_max(&[0.0, 0.0, 0.0]), 10.0);
    assert_eq!(y_axis_max(&[]), 10.0);
    assert_eq!(y_axis_max(&[-5.0, -1.0]), 10.0);
}

#[test]
fn slice_angles_sum_to_full_circle() {
    let data = [15.0, 20.0, 5.0];
    let total: f64 = data.iter().sum();
    let sum: f64 = data.iter().map(|&v| slice_angle(v, total)).sum();
    assert!((sum - std::f64::consts::TAU).abs() < 1e-9);
}

#[test]
fn whole_numbers_print_without_decimals() {
    assert_eq!(fmt_num(5.0), "5");
    assert_eq!(fmt_num(110.0), "110");
    assert_eq!(fmt_num(2.5), "2.5");
}

#[test]
fn renders_bars_to_a_png_block() {
    let img = render_chart(
        &spec(ChartKind::Bar, &["Rất tốt", "Tốt", "Khá"], &[15.0, 20.0, 5.0]),
        ChartStyle::Standard,
    )
    .unwrap();
    assert_eq!((img.width, img.height), (800, 500));
    assert_eq!((img.width_hint, img.height_hint), (500, 320));
    assert_eq!(&img.png[..4], &[0x89, b'P', b'N', b'G']);
    assert_eq!(img.caption, "Hình: Kết quả khảo sát");
}

#[test]
fn horizontal_bars_render_through_the_bar_path() {
    let img = render_chart(
        &spec(ChartKind::HorizontalBar, &["a", "b"], &[1.0, 2.0]),
        ChartStyle::Flat,
    );
    assert!(img.is_ok());
}

#[test]
fn renders_every_kind_in_every_style() {
    for kind in [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Doughnut,
    ] {
        for style in [ChartStyle::Standard, ChartStyle::Flat, ChartStyle::Dark] {
            let res = render_chart(&spec(kind, &["a", "b", "c"], &[3.0, 1.0, 2.0]), style);
            assert!(res.is_ok(), "kind {kind:?} style {style:?}");
        }
    }
}

#[test]
fn unplottable_specs_degrade_to_a_placeholder() {
    let img = render_chart(
        &spec(ChartKind::Bar, &["a", "b", "c"], &[1.0]),
        ChartStyle::Standard,
    )
    .unwrap();
    // Still a full-size canvas, never an error.
    assert_eq!((img.width, img.height), (800, 500));
}

#[test]
fn negative_values_render_as_zero_height_bars() {
    let img = render_chart(
        &spec(ChartKind::Bar, &["a", "b"], &[-5.0, 10.0]),
        ChartStyle::Standard,
    )
    .unwrap();
    assert_eq!((img.width, img.height), (800, 500));
    assert_eq!(img.caption, "Hình: Kết quả khảo sát");
}

#[test]
fn long_titles_still_render() {
    let mut s = spec(ChartKind::Line, &["a"], &[4.0]);
    s.title = "Một tiêu đề rất dài vượt quá năm mươi lăm ký tự để kiểm tra ngắt dòng".to_string();
    assert!(render_chart(&s, ChartStyle::Dark).is_ok());
}
