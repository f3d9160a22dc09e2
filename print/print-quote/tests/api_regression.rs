//! API Regression Tests for the Print Crate Ecosystem
//!
//! These tests pin the public API of the print-* crates through the umbrella
//! crate. They are organized in tiers of increasing scope:
//!
//! - Tier 1: Foundation (print-types)
//! - Tier 2: Cost engine (print-cost)
//! - Tier 3: Geometry estimates (print-estimate)
//! - Tier 4: Quotes from plates and archives
//! - Tier 5: Wire format (`serde` feature)
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs a version bump.
//!
//! To run: cargo test -p print-quote --all-features

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use approx::assert_relative_eq;
use print_quote::{cost, estimate, prelude::*, types};

// =============================================================================
// TIER 1: Foundation
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn plate_totals_follow_filaments() {
        let plate = types::PlateRecord::sliced(
            1,
            "Plate 1",
            vec![
                types::FilamentUsage::new("Generic PLA", "PLA", 20.0, 30.0),
                types::FilamentUsage::new("Generic PETG", "PETG", 30.0, 10.0),
            ],
            2.0,
        );
        assert_relative_eq!(plate.total_weight_g, 40.0);
        assert_relative_eq!(plate.material_cost(), 0.9, epsilon = 1e-12);
        assert!(!plate.is_estimated());
    }

    #[test]
    fn cube_measurements() {
        let cube = types::MeshObject::cube("cube", 10.0);
        assert_eq!(cube.face_count(), 12);
        assert_relative_eq!(cube.volume(), 1000.0, epsilon = 1e-9);
        assert_relative_eq!(cube.surface_area(), 600.0, epsilon = 1e-9);
        assert_relative_eq!(cube.height(), 10.0);
    }
}

// =============================================================================
// TIER 2: Cost Engine
// =============================================================================

mod tier2_cost {
    use super::*;

    #[test]
    fn unit_conversions() {
        assert_eq!(cost::MaterialUnit::Kg.to_base(1.5), 1500.0);
        assert_eq!(cost::MaterialUnit::L.to_base(0.25), 250.0);
        assert_eq!(cost::MaterialUnit::G.to_base(12.0), 12.0);
    }

    #[test]
    fn two_piece_breakdown() {
        let pieces = vec![
            PieceRecord::new("a", "A", 1.0, 2)
                .with_material(MaterialItem::filament("PLA", 100.0, MaterialUnit::G, 25.0)),
            PieceRecord::new("b", "B", 2.0, 1)
                .with_material(MaterialItem::filament("PETG", 150.0, MaterialUnit::G, 30.0)),
        ];
        let breakdown = compute_cost_breakdown(&pieces, &PricingInputs::default()).unwrap();
        assert_relative_eq!(breakdown.filament, 9.5, epsilon = 1e-12);
        assert_relative_eq!(breakdown.electricity, 0.0);
    }

    #[test]
    fn sale_price_rounds_up() {
        let price = compute_sale_price(30.12, 21.0, 25.0).unwrap();
        assert_relative_eq!(price.price_with_margin, 37.65, epsilon = 1e-9);
        assert_relative_eq!(price.price_with_tax, 45.5565, epsilon = 1e-9);
        assert_eq!(price.recommended_price, 46.0);
    }

    #[test]
    fn amortization_status() {
        let printer = PrinterAsset::new(1000.0, 2000.0, 500.0, 0.2);
        assert_relative_eq!(cost::amortization::cost_per_hour(&printer), 0.5);
        assert_relative_eq!(cost::amortization::progress_percent(&printer), 25.0);
        assert_relative_eq!(cost::amortization::remaining_amount(&printer), 750.0);
        assert!(!cost::amortization::is_fully_amortized(&printer));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let pieces = vec![PieceRecord::new("a", "A", f64::INFINITY, 1)];
        let err = compute_cost_breakdown(&pieces, &PricingInputs::default()).unwrap_err();
        assert!(matches!(err, cost::CostError::NonFinite { .. }));
    }
}

// =============================================================================
// TIER 3: Geometry Estimates
// =============================================================================

mod tier3_estimate {
    use super::*;

    #[test]
    fn presets_trade_time_for_quality() {
        let cube = MeshObject::cube("cube", 30.0);
        let fine = estimate_object(&cube, &EstimateParams::fine()).unwrap();
        let draft = estimate_object(&cube, &EstimateParams::draft()).unwrap();
        assert!(fine.print_time_hours > draft.print_time_hours);
        assert!(fine.layer_count > draft.layer_count);
    }

    #[test]
    fn degenerate_mesh_is_an_error() {
        let mut cube = MeshObject::cube("inside-out", 10.0);
        cube.flip_winding();
        let err = estimate_object(&cube, &EstimateParams::default()).unwrap_err();
        assert!(matches!(
            err,
            estimate::GeometryError::DegenerateMesh { .. }
        ));
    }
}

// =============================================================================
// TIER 4: Quotes
// =============================================================================

mod tier4_quote {
    use super::*;

    #[test]
    fn quote_bundles_breakdown_and_price() {
        let pieces = vec![
            PieceRecord::new("vase", "Vase", 4.0, 1)
                .with_material(MaterialItem::filament("PLA", 500.0, MaterialUnit::G, 25.0)),
        ];
        let inputs = PricingInputs::default()
            .with_electricity(0.25, 0.2)
            .with_vat(21.0)
            .with_margin(30.0);

        let quote = quote(&pieces, &inputs).unwrap();
        assert_relative_eq!(quote.totals.filament_g, 500.0);
        assert_relative_eq!(quote.breakdown.filament, 12.5, epsilon = 1e-12);
        // 4 h * 0.2 kW * 0.25
        assert_relative_eq!(quote.breakdown.electricity, 0.2, epsilon = 1e-12);
        assert_relative_eq!(quote.sale_price.base_price, 12.7, epsilon = 1e-12);
        assert!(quote.sale_price.recommended_price >= quote.sale_price.price_with_tax);
        assert_relative_eq!(quote.sale_price.recommended_price * 2.0 % 1.0, 0.0);
    }

    #[test]
    fn quote_is_deterministic() {
        let pieces = vec![
            PieceRecord::new("a", "A", 3.3, 3)
                .with_material(MaterialItem::filament("PLA", 33.3, MaterialUnit::G, 21.7)),
        ];
        let inputs = PricingInputs::default()
            .with_electricity(0.31, 0.13)
            .with_printer(PrinterAsset::new(799.0, 3000.0, 120.0, 0.13))
            .with_amortization(true)
            .with_vat(21.0)
            .with_margin(15.0);

        let first = quote(&pieces, &inputs).unwrap();
        let second = quote(&pieces, &inputs).unwrap();
        assert_eq!(
            first.breakdown.total().to_bits(),
            second.breakdown.total().to_bits()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn archive_summary_quote() {
        let plates = vec![
            PlateRecord::sliced(
                1,
                "Plate 1",
                vec![FilamentUsage::new("Bambu PLA Basic", "PLA", 20.0, 100.0)],
                2.0,
            ),
            PlateRecord::sliced_without_filaments(2, "Plate 2", 50.0, 1.0),
        ];
        let summary =
            PrintArchiveSummary::from_plates(Vendor::BambuStudio, plates, &MachineRates::default());

        let quote = quote_archive(&summary, &PricingInputs::default()).unwrap();
        assert_relative_eq!(quote.totals.filament_g, 150.0);
        assert_relative_eq!(quote.totals.print_hours, 3.0);
        // Plate 2 has no price, only plate 1 costs anything
        assert_relative_eq!(quote.breakdown.filament, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn unreadable_archive() {
        let err = parse_print_archive(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ArchiveError::Unreadable { .. }));
    }
}

// =============================================================================
// TIER 5: Wire Format
// =============================================================================

#[cfg(feature = "serde")]
mod tier5_serde {
    use super::*;

    #[test]
    fn pieces_from_camel_case_json() {
        let json = r#"[
            {
                "id": "p1",
                "name": "Bracket",
                "printHours": 1.5,
                "quantity": 2,
                "materials": [{
                    "id": "m1",
                    "materialName": "Prusament PETG",
                    "materialType": "PETG",
                    "weight": 0.04,
                    "unit": "kg",
                    "pricePerKg": 30.0,
                    "category": "filament"
                }]
            },
            { "id": "p2", "name": "Legacy", "printHours": 0.5, "filamentWeight": 20, "filamentPrice": 25 }
        ]"#;
        let pieces: Vec<PieceRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(pieces[1].quantity, 1);

        let breakdown = compute_cost_breakdown(&pieces, &PricingInputs::default()).unwrap();
        // 2 * 40 g @ 30 + 20 g @ 25
        assert_relative_eq!(breakdown.filament, 2.9, epsilon = 1e-12);
    }

    #[test]
    fn inputs_fill_defaults() {
        let inputs: PricingInputs =
            serde_json::from_str(r#"{ "vatPercent": 21, "profitMarginPercent": 30 }"#).unwrap();
        assert_relative_eq!(inputs.vat_percent, 21.0);
        assert!(inputs.printer.is_none());
        assert!(!inputs.include_amortization);
    }

    #[test]
    fn quote_serializes_camel_case() {
        let quote = quote(&[], &PricingInputs::default()).unwrap();
        let value = serde_json::to_value(quote).unwrap();
        assert!(value["salePrice"]["recommendedPrice"].is_number());
        assert!(value["totals"]["usedProjectFallback"].is_boolean());
    }
}
