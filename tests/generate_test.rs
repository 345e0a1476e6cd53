//! End-to-end tests: generate a certificate and read it back.

use image::{ImageFormat, RgbImage, RgbaImage};
use tempfile::TempDir;

use constancia::inspect::Element;
use constancia::{
    generate, generate_to_file, AssetConfig, AssetKind, Assets, Color, Constancia,
    DocumentFields, Error, FontRole, Inspection, StyleTokens,
};

fn write_logo(dir: &TempDir, name: &str, format: ImageFormat) -> std::path::PathBuf {
    let path = dir.path().join(name);
    match format {
        ImageFormat::Png => RgbaImage::from_pixel(300, 100, image::Rgba([232, 67, 147, 200]))
            .save_with_format(&path, format)
            .unwrap(),
        _ => RgbImage::from_pixel(120, 120, image::Rgb([42, 191, 191]))
            .save_with_format(&path, format)
            .unwrap(),
    }
    path
}

fn load_assets(dir: &TempDir) -> Assets {
    let logo = write_logo(dir, "logo.png", ImageFormat::Png);
    Assets::load(&AssetConfig::new(logo).with_standard_fonts()).unwrap()
}

fn full_fields() -> DocumentFields {
    DocumentFields::new(
        "Constancia de participación",
        "Por medio de la presente se hace constar que Ana López participó en el taller \
         de música durante el ciclo escolar, mostrando compromiso y puntualidad.\n\
         Se entrega para los fines que convengan.",
    )
    .with_city("Chihuahua, Chihuahua")
    .with_date("los 19 días del mes de Octubre del 2025")
    .with_signer("Lic. Juan Pérez", "Director", "Centro Cultural")
    .with_email("contacto@ejemplo.org")
    .with_phone("614 000 0000")
    .with_address("Calle Pino 607")
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

fn same_color(a: Option<Color>, b: Color) -> bool {
    a.map_or(false, |a| close(a.r, b.r) && close(a.g, b.g) && close(a.b, b.b))
}

fn y_of(inspection: &Inspection, text: &str) -> f32 {
    inspection
        .find_text(text)
        .unwrap_or_else(|| panic!("text {:?} not drawn", text))
        .y
}

#[test]
fn test_full_certificate() {
    let dir = TempDir::new().unwrap();
    let assets = load_assets(&dir);
    let pdf = generate(&full_fields(), &assets).unwrap();
    let inspection = Inspection::from_bytes(&pdf).unwrap();

    assert_eq!(inspection.info.version, "1.5");
    assert_eq!(inspection.info.page_count, 1);
    assert_eq!(inspection.info.page_size, (612.0, 792.0));
    assert_eq!(
        inspection.info.title.as_deref(),
        Some("Constancia de participación")
    );

    let title = inspection.find_text("Constancia de participación").unwrap();
    assert_eq!(title.role, Some(FontRole::Bold));
    assert!(close(title.size, 18.0));
    assert!(close(title.x, 60.0) && close(title.y, 692.0));

    let greeting = inspection.find_text("A quien corresponda:").unwrap();
    assert!(close(greeting.x, 75.0) && close(greeting.y, 574.0));

    let text: String = inspection
        .texts()
        .map(|run| run.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert!(text.contains("Se extiende la presente constancia"));
    assert!(text.contains("Chihuahua, Chihuahua"));
    assert!(text.contains("Atentamente:"));

    for label in ["Lic. Juan Pérez", "Centro Cultural"] {
        assert_eq!(inspection.find_text(label).unwrap().role, Some(FontRole::Bold));
    }
    assert_eq!(
        inspection.find_text("Director").unwrap().role,
        Some(FontRole::Regular)
    );
    assert!(inspection.find_text("Cel: 614 000 0000").is_some());
    assert!(inspection.find_text("Dirección: Calle Pino 607").is_some());
}

#[test]
fn test_signature_block_positions() {
    let dir = TempDir::new().unwrap();
    let pdf = generate(&full_fields(), &load_assets(&dir)).unwrap();
    let inspection = Inspection::from_bytes(&pdf).unwrap();

    let valediction = y_of(&inspection, "Atentamente:");
    assert!(close(y_of(&inspection, "Lic. Juan Pérez"), valediction - 83.0));
    assert!(close(y_of(&inspection, "Director"), valediction - 99.0));
    assert!(close(y_of(&inspection, "Centro Cultural"), valediction - 115.0));

    let signature = inspection
        .lines()
        .find_map(|e| match e {
            Element::Line { from, to, .. } if close(from.y, valediction - 65.0) => {
                Some((*from, *to))
            }
            _ => None,
        })
        .expect("signature line");
    assert!(close(signature.0.x, 75.0));
    assert!(close(signature.1.x - signature.0.x, 462.0 * 0.6));
}

#[test]
fn test_corners_and_frame() {
    let dir = TempDir::new().unwrap();
    let pdf = generate(&full_fields(), &load_assets(&dir)).unwrap();
    let inspection = Inspection::from_bytes(&pdf).unwrap();
    let style = StyleTokens::default();

    let corners: Vec<_> = inspection.filled_rects().collect();
    assert_eq!(corners.len(), 4);
    let expected = [
        (48.0, 647.0, style.teal),
        (550.0, 647.0, style.pink),
        (48.0, 78.0, style.teal),
        (550.0, 78.0, style.pink),
    ];
    for ((rect, color), (x, y, want)) in corners.iter().zip(expected) {
        assert!(close(rect.x, x) && close(rect.y, y), "corner at {:?}", rect);
        assert!(close(rect.width, 14.0) && close(rect.height, 14.0));
        assert!(same_color(*color, want));
    }

    let frame = inspection
        .elements
        .iter()
        .find_map(|e| match e {
            Element::Rect {
                rect,
                filled: false,
                color,
            } => Some((*rect, *color)),
            _ => None,
        })
        .expect("content box");
    assert!(close(frame.0.x, 55.0) && close(frame.0.y, 85.0));
    assert!(close(frame.0.width, 502.0) && close(frame.0.height, 569.0));
    assert!(same_color(frame.1, style.border));
}

#[test]
fn test_logo_fitted_in_box() {
    let dir = TempDir::new().unwrap();
    let pdf = generate(&full_fields(), &load_assets(&dir)).unwrap();
    let inspection = Inspection::from_bytes(&pdf).unwrap();

    let logo = inspection
        .elements
        .iter()
        .find_map(|e| match e {
            Element::Image { rect } => Some(*rect),
            _ => None,
        })
        .expect("logo drawn");

    // 300x100 scaled into the 150x90 box at (402, 672): 150x50, centered vertically
    assert!(close(logo.x, 402.0));
    assert!(close(logo.width, 150.0));
    assert!(close(logo.height, 50.0));
    assert!(close(logo.y, 672.0 + 20.0));
}

#[test]
fn test_jpeg_logo() {
    let dir = TempDir::new().unwrap();
    let logo = write_logo(&dir, "logo.jpeg", ImageFormat::Jpeg);
    let assets = Assets::load(&AssetConfig::new(logo).with_standard_fonts()).unwrap();
    let pdf = generate(&full_fields(), &assets).unwrap();

    let doc = lopdf::Document::load_mem(&pdf).unwrap();
    let has_dct = doc.objects.values().any(|obj| {
        obj.as_stream()
            .ok()
            .and_then(|s| s.dict.get(b"Filter").ok())
            .and_then(|f| f.as_name().ok())
            == Some(b"DCTDecode".as_slice())
    });
    assert!(has_dct);
}

#[test]
fn test_deterministic_output() {
    let dir = TempDir::new().unwrap();
    let assets = load_assets(&dir);
    let fields = full_fields();

    let first = generate(&fields, &assets).unwrap();
    let second = generate(&fields, &assets).unwrap();
    assert_eq!(first, second);

    let reloaded = load_assets(&dir);
    assert_eq!(first, generate(&fields, &reloaded).unwrap());
}

#[test]
fn test_missing_logo_fails() {
    let dir = TempDir::new().unwrap();
    let config = AssetConfig::new(dir.path().join("no-logo.jpeg")).with_standard_fonts();
    let err = Assets::load(&config).unwrap_err();
    assert!(matches!(
        err,
        Error::AssetUnavailable {
            asset: AssetKind::Logo,
            ..
        }
    ));
}

#[test]
fn test_corrupt_logo_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logo.png");
    std::fs::write(&path, b"not an image").unwrap();

    let err = Constancia::new()
        .with_logo(&path)
        .with_standard_fonts()
        .load()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::AssetUnavailable {
            asset: AssetKind::Logo,
            ..
        }
    ));
}

#[test]
fn test_generate_to_file() {
    let dir = TempDir::new().unwrap();
    let assets = load_assets(&dir);
    let out = dir.path().join("constancia.pdf");

    generate_to_file(&full_fields(), &assets, &out).unwrap();

    let inspection = Inspection::from_path(&out).unwrap();
    assert_eq!(inspection.info.page_count, 1);
}

#[test]
fn test_fields_from_json() {
    let dir = TempDir::new().unwrap();
    let json = r#"{
        "titulo": "Constancia estudiantil",
        "cuerpo": "Texto de la constancia.",
        "ciudad": "Chihuahua",
        "fecha": "hoy",
        "nombre_firma": "Isabel",
        "celular": "614"
    }"#;
    let fields = DocumentFields::from_json(json).unwrap();
    let pdf = generate(&fields, &load_assets(&dir)).unwrap();
    let inspection = Inspection::from_bytes(&pdf).unwrap();

    assert_eq!(inspection.info.title.as_deref(), Some("Constancia estudiantil"));
    assert!(inspection.find_text("Cel: 614").is_some());
    assert!(inspection.texts().all(|run| !run.text.starts_with("Email:")));
}

#[test]
fn test_two_paragraph_certificate_without_phone() {
    let dir = TempDir::new().unwrap();
    let fields = DocumentFields::new("Constancia", "Línea uno.\n\nLínea dos.")
        .with_city("Chihuahua")
        .with_date("1 de enero de 2025")
        .with_signer("Ana Ruiz", "Directora", "Centro X")
        .with_email("a@b.com")
        .with_phone("")
        .with_address("Calle 1");
    let pdf = generate(&fields, &load_assets(&dir)).unwrap();
    let inspection = Inspection::from_bytes(&pdf).unwrap();
    let style = StyleTokens::default();

    // blank middle paragraph adds one more gap between the two lines
    let uno = y_of(&inspection, "Línea uno.");
    assert!(close(uno - y_of(&inspection, "Línea dos."), 16.0 + 6.0 + 6.0));

    let text = inspection
        .texts()
        .map(|run| run.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert!(text.contains("convengan, en Chihuahua a 1 de enero de 2025."));

    let v = y_of(&inspection, "Atentamente:");
    assert!(close(y_of(&inspection, "Ana Ruiz"), v - 83.0));
    assert!(close(y_of(&inspection, "Directora"), v - 99.0));
    assert!(close(y_of(&inspection, "Centro X"), v - 115.0));

    // empty phone collapses: address takes the second contact line
    assert!(inspection.texts().all(|run| !run.text.starts_with("Cel:")));
    assert!(close(y_of(&inspection, "Email: "), v - 137.0));
    assert!(close(y_of(&inspection, "Dirección: Calle 1"), v - 153.0));

    let email = inspection.find_text("a@b.com").unwrap();
    assert!(same_color(email.color, style.link));
    let underline = inspection.lines().find_map(|e| match e {
        Element::Line { from, width, .. } if close(from.y, email.y - 1.5) => *width,
        _ => None,
    });
    assert!(close(underline.expect("email underline"), 0.5));

    let corners: Vec<_> = inspection.filled_rects().collect();
    assert_eq!(corners.len(), 4);
    let colors = [style.teal, style.pink, style.teal, style.pink];
    for ((_, color), want) in corners.iter().zip(colors) {
        assert!(same_color(*color, want));
    }
}
