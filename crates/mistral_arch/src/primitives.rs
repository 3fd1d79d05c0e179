//! Instantiation of the fixed hard primitives of a Cyclone V die.
//!
//! Each `create_*` method adds one primitive kind at one grid coordinate and
//! enumerates its full logical pin list in a fixed order, resolving every pin
//! to a routing node through the [`DeviceGeometry`]. The pin layouts mirror
//! the device database naming: array pins are named `name[i]` and DSP operand
//! banks `dataina` through `datainl`.

use crate::constids::ConstId;
use crate::geometry::{BlockType, DeviceGeometry, PortQuery, PortType};
use crate::ids::{BelId, WireId};
use crate::model::{ArchModel, PortDir};
use crate::policy::BuildPolicy;
use mistral_common::Ident;
use mistral_diagnostics::{Diagnostic, DiagnosticSink, BUILD_SUMMARY, CLKBUF_NARROWING};

/// Operand banks of a DSP slice, indexed by block index.
const DSP_DATAIN_BANKS: [char; 12] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l'];

/// Device port indices backing the DSP `unk_in` pins.
const DSP_UNK_IN_PORTS: [u32; 8] = [30, 31, 62, 63, 94, 95, 126, 127];

/// Fills an [`ArchModel`] from a device geometry.
///
/// Construction is single-threaded; the builder holds the model mutably
/// until [`ArchBuilder::finish`] hands it back.
pub struct ArchBuilder<'a, G: DeviceGeometry + ?Sized> {
    model: ArchModel,
    geometry: &'a G,
    policy: &'a BuildPolicy,
}

impl<'a, G: DeviceGeometry + ?Sized> ArchBuilder<'a, G> {
    /// Starts building into a fresh model.
    pub fn new(geometry: &'a G, policy: &'a BuildPolicy) -> Self {
        Self {
            model: ArchModel::new(),
            geometry,
            policy,
        }
    }

    /// Finishes construction and returns the model.
    pub fn finish(self) -> ArchModel {
        self.model
    }

    fn get_port(&self, query: PortQuery) -> WireId {
        match self.geometry.port(&query) {
            Some(wire) => wire,
            None => panic!("device has no port {query}"),
        }
    }

    fn pin(&mut self, bel: BelId, name: Ident, dir: PortDir, query: PortQuery) {
        let wire = self.get_port(query);
        self.model.add_bel_pin(bel, name, dir, wire);
    }

    fn array_pin(&mut self, bel: BelId, name: &str, i: u32, dir: PortDir, query: PortQuery) {
        let name = self.model.indexed_id(name, i);
        self.pin(bel, name, dir, query);
    }

    /// Adds the DSP slice at `(x, y)`.
    pub fn create_dsp(&mut self, x: i32, y: i32) -> BelId {
        let dsp = ConstId::CyclonevDsp.ident();
        let bel = self.model.add_bel(x, y, dsp, dsp);
        let port = |p| PortQuery::new(BlockType::Dsp, x, y, p);

        self.pin(bel, ConstId::Accumulate.ident(), PortDir::In, port(PortType::Accumulate));
        for i in 0..4 {
            self.array_pin(bel, "aclr", i, PortDir::In, port(PortType::Aclr).port_index(i));
        }
        for i in 0..6 {
            self.array_pin(bel, "clkin", i, PortDir::In, port(PortType::ClkIn).port_index(i));
        }
        for i in 0..9 {
            for (bank, &letter) in DSP_DATAIN_BANKS.iter().enumerate() {
                let query = port(PortType::DataIn).block_index(bank as u32).port_index(i);
                self.array_pin(bel, &format!("datain{letter}"), i, PortDir::In, query);
            }
        }
        for i in 0..3 {
            self.array_pin(bel, "enable", i, PortDir::In, port(PortType::Enable).port_index(i));
        }
        self.pin(bel, ConstId::Loadconst.ident(), PortDir::In, port(PortType::LoadConst));
        self.pin(bel, ConstId::Negate.ident(), PortDir::In, port(PortType::Negate));
        for i in 0..74 {
            self.array_pin(bel, "result", i, PortDir::Out, port(PortType::Result).port_index(i));
        }
        self.pin(bel, ConstId::Sub.ident(), PortDir::In, port(PortType::Sub));
        for (i, &unk) in DSP_UNK_IN_PORTS.iter().enumerate() {
            let query = port(PortType::UnkIn).port_index(unk);
            self.array_pin(bel, "unk_in", i as u32, PortDir::In, query);
        }
        bel
    }

    /// Adds the clock buffers at `(x, y)`, one per enabled sub-index.
    ///
    /// Only the general-routing input path is modelled; the enable pin and
    /// dedicated clock-pin inputs are not.
    pub fn create_clkbuf(&mut self, x: i32, y: i32) -> Vec<BelId> {
        let policy = self.policy;
        let mut bels = Vec::with_capacity(policy.clkbuf_sub_indices.len());
        for &z in &policy.clkbuf_sub_indices {
            let name = self.model.indexed_id("CLKBUF", z);
            let bel = self.model.add_bel(x, y, name, ConstId::MistralClkena.ident());
            let clkin = PortQuery::new(BlockType::CmuxHg, x, y, PortType::ClkIn).port_index(z);
            let clkout = PortQuery::new(BlockType::CmuxHg, x, y, PortType::ClkOut).block_index(z);
            self.pin(bel, ConstId::A.ident(), PortDir::In, clkin);
            self.pin(bel, ConstId::Q.ident(), PortDir::Out, clkout);
            self.model.set_block_index(bel, z);
            bels.push(bel);
        }
        bels
    }

    /// Adds the HPS MPU general-purpose interface at `(x, y)`.
    pub fn create_hps_mpu_general_purpose(&mut self, x: i32, y: i32) -> BelId {
        let gp = ConstId::CyclonevHpsInterfaceMpuGeneralPurpose.ident();
        let bel = self.model.add_bel(x, y, gp, gp);
        let port = |p| PortQuery::new(BlockType::HpsMpuGeneralPurpose, x, y, p);
        for i in 0..32 {
            self.array_pin(bel, "gp_in", i, PortDir::In, port(PortType::GpIn).port_index(i));
            self.array_pin(bel, "gp_out", i, PortDir::Out, port(PortType::GpOut).port_index(i));
        }
        bel
    }

    /// Adds the control-block oscillator at `(x, y)`.
    pub fn create_control(&mut self, x: i32, y: i32) -> BelId {
        let osc = ConstId::CyclonevOscillator.ident();
        let bel = self.model.add_bel(x, y, osc, osc);
        let port = |p| PortQuery::new(BlockType::Ctrl, x, y, p);
        self.pin(bel, ConstId::Oscena.ident(), PortDir::In, port(PortType::OscEna));
        self.pin(bel, ConstId::Clkout.ident(), PortDir::Out, port(PortType::OscClkOut));
        self.pin(bel, ConstId::Clkout1.ident(), PortDir::Out, port(PortType::OscClkOut1));
        bel
    }

    /// Instantiates every enabled primitive the geometry places at `(x, y)`.
    pub fn build_tile(&mut self, x: i32, y: i32) {
        for block in self.geometry.blocks_at(x, y) {
            match block {
                BlockType::Dsp if self.policy.dsp => {
                    self.create_dsp(x, y);
                }
                BlockType::CmuxHg if self.policy.clkbuf => {
                    self.create_clkbuf(x, y);
                }
                BlockType::HpsMpuGeneralPurpose if self.policy.hps => {
                    self.create_hps_mpu_general_purpose(x, y);
                }
                BlockType::Ctrl if self.policy.control => {
                    self.create_control(x, y);
                }
                _ => {}
            }
        }
    }

    /// Adds every routing edge the geometry reports.
    pub fn build_routing(&mut self) {
        for (src, dst) in self.geometry.routing_edges() {
            let delay = self
                .geometry
                .edge_delay(src, dst)
                .unwrap_or(self.policy.default_pip_delay);
            self.model.add_pip(src, dst, delay);
        }
    }
}

/// Builds the complete architecture model for a device.
///
/// Walks the grid row by row, instantiating primitives at each coordinate,
/// then adds the routing edges. Reports an `A001` build summary and, when
/// clock buffers are enabled, an `A002` note on the modelled sub-indices
/// located at the first clock buffer.
///
/// # Panics
///
/// Panics if the geometry places a block but cannot resolve one of its ports,
/// or reports the same routing edge twice.
pub fn build_arch<G: DeviceGeometry + ?Sized>(
    geometry: &G,
    policy: &BuildPolicy,
    sink: &DiagnosticSink,
) -> ArchModel {
    let mut builder = ArchBuilder::new(geometry, policy);
    for y in 0..geometry.height() {
        for x in 0..geometry.width() {
            builder.build_tile(x, y);
        }
    }
    builder.build_routing();
    let model = builder.finish();

    let device = policy.device.as_deref().unwrap_or("device");
    sink.emit(Diagnostic::note(
        BUILD_SUMMARY,
        format!(
            "{device}: built {} bels with {} pins over {} routing nodes and {} routing edges",
            model.bel_count(),
            model.bel_pin_count(),
            model.wire_count(),
            model.pip_count()
        ),
    ));
    if policy.clkbuf {
        let clkena = ConstId::MistralClkena.ident();
        let clkbufs: Vec<_> = model
            .bels()
            .filter(|(_, b)| b.bel_type == clkena)
            .map(|(_, b)| b.loc)
            .collect();
        let indices: Vec<String> = policy
            .clkbuf_sub_indices
            .iter()
            .map(u32::to_string)
            .collect();
        let mut note = Diagnostic::note(
            CLKBUF_NARROWING,
            format!(
                "modelled {} clock buffers using sub-indices [{}]",
                clkbufs.len(),
                indices.join(", ")
            ),
        )
        .with_note("the remaining clock-buffer sub-indices are not instantiated");
        if let Some(first) = clkbufs.first() {
            note = note.at(*first);
        }
        sink.emit(note);
    }
    model
}

/// Returns `true` for the clock-buffer cell types.
pub fn is_clkbuf_cell(cell_type: Ident) -> bool {
    cell_type == ConstId::MistralClkena.ident() || cell_type == ConstId::MistralClkbuf.ident()
}

/// Returns `true` for LUT, arithmetic and MLAB cell types.
pub fn is_comb_cell(cell_type: Ident) -> bool {
    matches!(
        ConstId::from_ident(cell_type),
        Some(
            ConstId::MistralAlut6
                | ConstId::MistralAlut5
                | ConstId::MistralAlut4
                | ConstId::MistralAlut3
                | ConstId::MistralAlut2
                | ConstId::MistralNot
                | ConstId::MistralBuf
                | ConstId::MistralAlutArith
                | ConstId::MistralMlab
        )
    )
}

/// Returns `true` for the flip-flop cell type.
pub fn is_dff_cell(cell_type: Ident) -> bool {
    cell_type == ConstId::MistralFf.ident()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::Delay;
    use crate::geometry::SyntheticGeometry;
    use crate::ids::PipId;
    use mistral_common::Loc;
    use std::collections::HashSet;

    fn count_prefix(model: &ArchModel, bel: BelId, prefix: &str) -> usize {
        model
            .bel_pins(bel)
            .iter()
            .filter(|p| {
                let name = model.name(p.name);
                name == prefix || name.starts_with(&format!("{prefix}["))
            })
            .count()
    }

    #[test]
    fn dsp_pin_layout() {
        let geom = SyntheticGeometry::new(8, 8).with_block(3, 5, BlockType::Dsp);
        let policy = BuildPolicy::default();
        let mut builder = ArchBuilder::new(&geom, &policy);
        let bel = builder.create_dsp(3, 5);
        let model = builder.finish();

        assert_eq!(model.bels_at(3, 5), &[bel]);
        let pins = model.bel_pins(bel);
        assert_eq!(pins.len(), 207);
        assert_eq!(count_prefix(&model, bel, "accumulate"), 1);
        assert_eq!(count_prefix(&model, bel, "aclr"), 4);
        assert_eq!(count_prefix(&model, bel, "clkin"), 6);
        let datain = pins
            .iter()
            .filter(|p| model.name(p.name).starts_with("datain"))
            .count();
        assert_eq!(datain, 108);
        assert_eq!(count_prefix(&model, bel, "enable"), 3);
        assert_eq!(count_prefix(&model, bel, "loadconst"), 1);
        assert_eq!(count_prefix(&model, bel, "negate"), 1);
        assert_eq!(count_prefix(&model, bel, "result"), 74);
        assert_eq!(count_prefix(&model, bel, "sub"), 1);
        assert_eq!(count_prefix(&model, bel, "unk_in"), 8);

        let wires: HashSet<_> = pins.iter().map(|p| p.wire).collect();
        assert_eq!(wires.len(), 207);
        assert!(wires.iter().all(|w| w.is_valid()));

        let outputs = pins.iter().filter(|p| p.dir == PortDir::Out).count();
        assert_eq!(outputs, 74);
    }

    #[test]
    fn dsp_pins_resolve_to_expected_ports() {
        let geom = SyntheticGeometry::new(8, 8).with_block(3, 5, BlockType::Dsp);
        let policy = BuildPolicy::default();
        let mut builder = ArchBuilder::new(&geom, &policy);
        let bel = builder.create_dsp(3, 5);
        let model = builder.finish();

        let datainc4 = model.bel_pin_wire(bel, model.id("datainc[4]")).unwrap();
        let q = PortQuery::new(BlockType::Dsp, 3, 5, PortType::DataIn)
            .block_index(2)
            .port_index(4);
        assert_eq!(geom.port(&q), Some(datainc4));

        let unk = model.bel_pin_wire(bel, model.id("unk_in[5]")).unwrap();
        let q = PortQuery::new(BlockType::Dsp, 3, 5, PortType::UnkIn).port_index(95);
        assert_eq!(geom.port(&q), Some(unk));

        let order: Vec<&str> = model.bel_pins(bel)[11..14]
            .iter()
            .map(|p| model.name(p.name))
            .collect();
        assert_eq!(order, ["dataina[0]", "datainb[0]", "datainc[0]"]);
    }

    #[test]
    fn clkbuf_models_only_sub_index_two() {
        let geom = SyntheticGeometry::new(4, 4).with_block(1, 2, BlockType::CmuxHg);
        for z in 0..4 {
            let q = PortQuery::new(BlockType::CmuxHg, 1, 2, PortType::ClkOut).block_index(z);
            assert!(geom.port(&q).is_some());
        }

        let policy = BuildPolicy::default();
        let mut builder = ArchBuilder::new(&geom, &policy);
        let bels = builder.create_clkbuf(1, 2);
        let model = builder.finish();

        assert_eq!(bels.len(), 1);
        let info = model.bel(bels[0]);
        assert_eq!(model.name(info.name), "CLKBUF[2]");
        assert_eq!(info.bel_type, ConstId::MistralClkena.ident());
        assert_eq!(info.block_index, Some(2));
        assert_eq!(info.loc.z, 0);
        let pins = model.bel_pins(bels[0]);
        assert_eq!(pins.len(), 2);
        assert_eq!((pins[0].name, pins[0].dir), (ConstId::A.ident(), PortDir::In));
        assert_eq!((pins[1].name, pins[1].dir), (ConstId::Q.ident(), PortDir::Out));

        let clkin = PortQuery::new(BlockType::CmuxHg, 1, 2, PortType::ClkIn).port_index(2);
        assert_eq!(geom.port(&clkin), Some(pins[0].wire));
    }

    #[test]
    fn clkbuf_follows_policy_sub_indices() {
        let geom = SyntheticGeometry::new(4, 4).with_block(0, 0, BlockType::CmuxHg);
        let policy = BuildPolicy {
            clkbuf_sub_indices: vec![0, 2, 3],
            ..BuildPolicy::default()
        };
        let mut builder = ArchBuilder::new(&geom, &policy);
        let bels = builder.create_clkbuf(0, 0);
        let model = builder.finish();
        let blocks: Vec<_> = bels.iter().map(|&b| model.bel(b).block_index).collect();
        assert_eq!(blocks, [Some(0), Some(2), Some(3)]);
    }

    #[test]
    fn hps_pins_interleave() {
        let geom = SyntheticGeometry::new(2, 2).with_block(1, 1, BlockType::HpsMpuGeneralPurpose);
        let policy = BuildPolicy::default();
        let mut builder = ArchBuilder::new(&geom, &policy);
        let bel = builder.create_hps_mpu_general_purpose(1, 1);
        let model = builder.finish();
        let pins = model.bel_pins(bel);
        assert_eq!(pins.len(), 64);
        assert_eq!(model.name(pins[0].name), "gp_in[0]");
        assert_eq!(model.name(pins[1].name), "gp_out[0]");
        assert_eq!(model.name(pins[63].name), "gp_out[31]");
        assert_eq!(pins[1].dir, PortDir::Out);
    }

    #[test]
    fn control_oscillator() {
        let geom = SyntheticGeometry::new(2, 2).with_block(0, 1, BlockType::Ctrl);
        let policy = BuildPolicy::default();
        let mut builder = ArchBuilder::new(&geom, &policy);
        let bel = builder.create_control(0, 1);
        let model = builder.finish();
        let names: Vec<_> = model
            .bel_pins(bel)
            .iter()
            .map(|p| (model.name(p.name), p.dir))
            .collect();
        assert_eq!(
            names,
            [
                ("oscena", PortDir::In),
                ("clkout", PortDir::Out),
                ("clkout1", PortDir::Out)
            ]
        );
    }

    #[test]
    #[should_panic(expected = "device has no port Ctrl at X0Y0 port OscClkOut1")]
    fn absent_port_panics() {
        let geom = SyntheticGeometry::new(1, 1)
            .with_block(0, 0, BlockType::Ctrl)
            .without_port(PortQuery::new(BlockType::Ctrl, 0, 0, PortType::OscClkOut1));
        let policy = BuildPolicy::default();
        ArchBuilder::new(&geom, &policy).create_control(0, 0);
    }

    #[test]
    #[should_panic(expected = "duplicate bel cyclonev_dsp")]
    fn building_a_tile_twice_panics() {
        let geom = SyntheticGeometry::new(4, 4).with_block(3, 3, BlockType::Dsp);
        let policy = BuildPolicy::default();
        let mut builder = ArchBuilder::new(&geom, &policy);
        builder.build_tile(3, 3);
        builder.build_tile(3, 3);
    }

    #[test]
    fn same_primitive_twice_gives_same_bindings() {
        let geom = SyntheticGeometry::new(8, 8).with_block(3, 5, BlockType::Dsp);
        let policy = BuildPolicy::default();

        let mut first = ArchBuilder::new(&geom, &policy);
        first.create_dsp(3, 5);
        let first = first.finish();
        let mut second = ArchBuilder::new(&geom, &policy);
        second.create_dsp(3, 5);
        let second = second.finish();

        assert_eq!(first.binding_fingerprint(), second.binding_fingerprint());
        let a = first.bels_at(3, 5)[0];
        let b = second.bels_at(3, 5)[0];
        assert_eq!(first.bel_pins(a), second.bel_pins(b));
    }

    #[test]
    fn disabled_primitives_are_skipped() {
        let geom = SyntheticGeometry::new(2, 1)
            .with_block(0, 0, BlockType::Dsp)
            .with_block(1, 0, BlockType::Ctrl);
        let policy = BuildPolicy {
            dsp: false,
            ..BuildPolicy::default()
        };
        let model = build_arch(&geom, &policy, &DiagnosticSink::new());
        assert!(model.bels_at(0, 0).is_empty());
        assert_eq!(model.bels_at(1, 0).len(), 1);
    }

    #[test]
    fn routing_edges_use_geometry_or_default_delay() {
        let mut geom = SyntheticGeometry::new(1, 1);
        let (a, b, c) = (WireId::from_raw(1), WireId::from_raw(2), WireId::from_raw(3));
        geom.add_edge(a, b, Some(Delay::from_ps(35)));
        geom.add_edge(b, c, None);
        let policy = BuildPolicy {
            default_pip_delay: Delay::from_ps(90),
            ..BuildPolicy::default()
        };
        let model = build_arch(&geom, &policy, &DiagnosticSink::new());
        assert_eq!(model.pip_delay(PipId::new(a, b)), Delay::from_ps(35));
        assert_eq!(model.pip_delay(PipId::new(b, c)), Delay::from_ps(90));
    }

    #[test]
    fn build_reports_summary_and_narrowing() {
        let geom = SyntheticGeometry::new(2, 2)
            .with_block(0, 0, BlockType::CmuxHg)
            .with_block(1, 1, BlockType::Ctrl);
        let sink = DiagnosticSink::new();
        build_arch(&geom, &BuildPolicy::default(), &sink);
        let diags = sink.take_all();
        let codes: Vec<String> = diags.iter().map(|d| d.code.to_string()).collect();
        assert_eq!(codes, ["A001", "A002"]);
        assert!(diags[0].message.starts_with("device: built 2 bels with 5 pins"));
        assert_eq!(diags[0].location, None);
        assert!(diags[1].message.contains("1 clock buffers using sub-indices [2]"));
        assert_eq!(diags[1].location, Some(Loc::new(0, 0, 0)));
    }

    #[test]
    fn summary_names_the_device() {
        let geom = SyntheticGeometry::new(3, 2).with_block(2, 1, BlockType::CmuxHg);
        let policy = BuildPolicy {
            device: Some("5CSEBA6U23I7".into()),
            ..BuildPolicy::default()
        };
        let sink = DiagnosticSink::new();
        build_arch(&geom, &policy, &sink);
        let summary = sink.with_code(BUILD_SUMMARY);
        assert!(summary[0].message.starts_with("5CSEBA6U23I7: built 1 bels"));
        let narrowing = sink.with_code(CLKBUF_NARROWING);
        assert_eq!(narrowing[0].location, Some(Loc::new(2, 1, 0)));
    }

    #[test]
    fn narrowing_without_clock_buffers_has_no_location() {
        let geom = SyntheticGeometry::new(1, 1).with_block(0, 0, BlockType::Ctrl);
        let sink = DiagnosticSink::new();
        build_arch(&geom, &BuildPolicy::default(), &sink);
        let narrowing = sink.with_code(CLKBUF_NARROWING);
        assert!(narrowing[0].message.starts_with("modelled 0 clock buffers"));
        assert_eq!(narrowing[0].location, None);
    }

    #[test]
    fn cell_type_classification() {
        assert!(is_clkbuf_cell(ConstId::MistralClkena.ident()));
        assert!(is_clkbuf_cell(ConstId::MistralClkbuf.ident()));
        assert!(!is_clkbuf_cell(ConstId::MistralFf.ident()));

        assert!(is_comb_cell(ConstId::MistralAlut6.ident()));
        assert!(is_comb_cell(ConstId::MistralAlutArith.ident()));
        assert!(is_comb_cell(ConstId::MistralMlab.ident()));
        assert!(!is_comb_cell(ConstId::MistralFf.ident()));
        assert!(!is_comb_cell(ConstId::CyclonevDsp.ident()));

        assert!(is_dff_cell(ConstId::MistralFf.ident()));
        assert!(!is_dff_cell(ConstId::MistralAlut2.ident()));
    }
}
