//! # 事务式状态管理
//!
//! `CrystalState` 持有已提交的 `Crystal` 与最近一次有效快照。
//! 每次编辑都在待定副本上执行：耦合 → 校验 → 构建晶胞 → 推导倒格矢 → 重建倒格点，
//! 全部成功后整体替换 `Crystal` 并刷新快照；任一步失败时已提交状态保持不变，
//! 调用方用返回的快照恢复编辑器中的数值。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `diffraction/cell.rs`, `constraints.rs`, `zone.rs`

use crate::diffraction::cell::{basis_allowed, build_lattice};
use crate::diffraction::constraints::{couple, validate};
use crate::diffraction::zone::ZoneEnumerator;
use crate::error::{RelpError, Result};
use crate::math::Hkl;
use crate::models::{
    BasisType, Crystal, Field, LatticeParameters, ReciprocalSpace, System, ZoneAxis,
};

/// 最近一次成功提交的输入
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommittedSnapshot {
    pub system: System,
    pub params: LatticeParameters,
    pub basis: BasisType,
    pub zone: ZoneAxis,
}

/// 一次编辑请求
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditRequest {
    pub system: System,
    pub basis: BasisType,
    pub params: LatticeParameters,
    pub zone: Hkl,
    /// 最近编辑的参数；切换晶系或整体修改时为 `Field::None`
    pub edited: Field,
}

impl EditRequest {
    /// 以快照为起点的请求（未编辑任何参数）
    pub fn from_snapshot(snapshot: &CommittedSnapshot) -> Self {
        EditRequest {
            system: snapshot.system,
            basis: snapshot.basis,
            params: snapshot.params,
            zone: snapshot.zone.hkl(),
            edited: Field::None,
        }
    }
}

/// 编辑结果
#[derive(Debug)]
pub enum UpdateOutcome {
    /// 已提交；附带耦合后的参数与实际使用的格心和晶带轴
    Committed {
        params: LatticeParameters,
        basis: BasisType,
        zone: ZoneAxis,
    },
    /// 已回滚；`restored` 为调用方应恢复的快照
    RolledBack {
        reason: RelpError,
        restored: CommittedSnapshot,
    },
}

impl UpdateOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, UpdateOutcome::Committed { .. })
    }
}

/// 已提交的晶体模型与回滚快照
#[derive(Debug, Clone)]
pub struct CrystalState {
    crystal: Crystal,
    snapshot: CommittedSnapshot,
    enumerator: ZoneEnumerator,
}

impl CrystalState {
    /// 以立方/简单格心、晶带轴 [1 0 0] 初始化
    ///
    /// 参数必须满足立方约束，否则返回 `InvalidParameters`；
    /// 参考默认值为 `LatticeParameters::cubic(5.0)`。
    pub fn init(params: LatticeParameters) -> Result<Self> {
        Self::init_with(params, ZoneEnumerator::new())
    }

    /// 使用指定枚举器初始化
    pub fn init_with(params: LatticeParameters, enumerator: ZoneEnumerator) -> Result<Self> {
        let snapshot = CommittedSnapshot {
            system: System::Cubic,
            params,
            basis: BasisType::Primitive,
            zone: ZoneAxis::DEFAULT,
        };
        check_parameters(snapshot.system, &params)?;
        let crystal = regenerate(&snapshot, &enumerator)?;

        Ok(CrystalState {
            crystal,
            snapshot,
            enumerator,
        })
    }

    /// 唯一的事务入口
    ///
    /// 可预期的失败（参数无效、格心不兼容、晶带轴退化）返回
    /// `UpdateOutcome::RolledBack`；退化晶胞作为 `Err` 上报。
    /// 两种情况下已提交的模型都保持不变。
    pub fn update(&mut self, request: &EditRequest) -> Result<UpdateOutcome> {
        let pending = self.prepare(request);

        let crystal = match check_parameters(pending.system, &pending.params)
            .and_then(|_| regenerate(&pending, &self.enumerator))
        {
            Ok(crystal) => crystal,
            Err(reason) if reason.is_recoverable() => {
                return Ok(UpdateOutcome::RolledBack {
                    reason,
                    restored: self.snapshot,
                });
            }
            Err(fatal) => return Err(fatal),
        };

        self.crystal = crystal;
        self.snapshot = pending;

        Ok(UpdateOutcome::Committed {
            params: pending.params,
            basis: pending.basis,
            zone: pending.zone,
        })
    }

    /// 归一化请求：零晶带轴替换为 [1 0 0]，不兼容格心回退为简单格心，再耦合参数
    fn prepare(&self, request: &EditRequest) -> CommittedSnapshot {
        let basis = if basis_allowed(request.system, request.basis) {
            request.basis
        } else {
            BasisType::Primitive
        };

        let mut params = request.params;
        couple(request.system, request.edited, &mut params);

        CommittedSnapshot {
            system: request.system,
            params,
            basis,
            zone: ZoneAxis::or_default(request.zone),
        }
    }

    pub fn crystal(&self) -> &Crystal {
        &self.crystal
    }

    pub fn system(&self) -> System {
        self.crystal.lattice.system()
    }

    pub fn basis_type(&self) -> BasisType {
        self.crystal.basis.basis_type()
    }

    pub fn parameters(&self) -> &LatticeParameters {
        self.crystal.lattice.parameters()
    }

    pub fn space(&self) -> &ReciprocalSpace {
        &self.crystal.space
    }

    pub fn snapshot(&self) -> &CommittedSnapshot {
        &self.snapshot
    }

    pub fn enumerator(&self) -> &ZoneEnumerator {
        &self.enumerator
    }
}

fn check_parameters(system: System, params: &LatticeParameters) -> Result<()> {
    if !params.in_bounds() {
        return Err(RelpError::InvalidParameters {
            system,
            reason: format!("out of range ({})", params),
        });
    }
    if !validate(system, params) {
        return Err(RelpError::InvalidParameters {
            system,
            reason: format!("symmetry constraints not satisfied ({})", params),
        });
    }
    Ok(())
}

/// 由快照完整重建晶体（晶格、原子基元、倒空间）
fn regenerate(input: &CommittedSnapshot, enumerator: &ZoneEnumerator) -> Result<Crystal> {
    let (lattice, basis) = build_lattice(input.system, input.basis, &input.params)?;
    let space = enumerator.generate(&lattice, &basis, input.zone)?;
    Ok(Crystal::new(lattice, basis, space))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn default_state() -> CrystalState {
        CrystalState::init(LatticeParameters::cubic(5.0)).unwrap()
    }

    fn request(system: System, basis: BasisType, params: LatticeParameters) -> EditRequest {
        EditRequest {
            system,
            basis,
            params,
            zone: Hkl::new(1, 0, 0),
            edited: Field::None,
        }
    }

    #[test]
    fn test_init_defaults() {
        let state = default_state();
        assert_eq!(state.system(), System::Cubic);
        assert_eq!(state.basis_type(), BasisType::Primitive);
        assert_eq!(state.space().zone(), ZoneAxis::DEFAULT);
        assert!(!state.space().is_empty());
    }

    #[test]
    fn test_init_rejects_non_cubic() {
        let err = CrystalState::init(LatticeParameters::new(4.0, 5.0, 6.0, 90.0, 90.0, 90.0))
            .unwrap_err();
        assert!(matches!(err, RelpError::InvalidParameters { .. }));
    }

    #[test]
    fn test_cubic_zone_001_scenario() {
        let mut state = default_state();
        let mut req = EditRequest::from_snapshot(state.snapshot());
        req.zone = Hkl::new(0, 0, 1);

        assert!(state.update(&req).unwrap().is_committed());
        assert!(state.space().find(Hkl::new(1, 0, 0)).is_some());
        assert!(state.space().find(Hkl::new(0, 0, 1)).is_none());
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut state = default_state();
        let mut req = request(
            System::Monoclinic,
            BasisType::BaseCentered,
            LatticeParameters::new(4.0, 5.0, 6.0, 90.0, 101.0, 90.0),
        );
        req.zone = Hkl::new(1, 1, 0);

        state.update(&req).unwrap();
        let first = state.space().clone();
        state.update(&req).unwrap();

        assert_eq!(state.space(), &first);
        for (a, b) in state.space().points().iter().zip(first.points()) {
            assert_eq!(a.u.to_bits(), b.u.to_bits());
            assert_eq!(a.v.to_bits(), b.v.to_bits());
            assert_eq!(a.intensity.to_bits(), b.intensity.to_bits());
        }
    }

    #[test]
    fn test_invalid_edit_rolls_back() {
        let mut state = default_state();
        let before = state.crystal().clone();
        let snapshot = *state.snapshot();

        // 三方只编辑长度时不会同步角度
        let req = EditRequest {
            system: System::Rhombohedral,
            basis: BasisType::Primitive,
            params: LatticeParameters::new(4.0, 4.0, 4.0, 70.0, 80.0, 90.0),
            zone: Hkl::new(1, 1, 1),
            edited: Field::A,
        };

        match state.update(&req).unwrap() {
            UpdateOutcome::RolledBack { reason, restored } => {
                assert!(matches!(reason, RelpError::InvalidParameters { .. }));
                assert_eq!(restored, snapshot);
            }
            UpdateOutcome::Committed { .. } => panic!("edit should have been rejected"),
        }
        assert_eq!(state.crystal(), &before);
        assert_eq!(state.snapshot(), &snapshot);
    }

    #[test]
    fn test_out_of_range_rolls_back() {
        let mut state = default_state();
        let before = state.crystal().clone();

        let mut req = EditRequest::from_snapshot(state.snapshot());
        req.params.a = -1.0;
        req.edited = Field::A;

        assert!(!state.update(&req).unwrap().is_committed());
        assert_eq!(state.crystal(), &before);
    }

    #[test]
    fn test_unrealisable_triclinic_cell_is_fatal() {
        let mut state = default_state();
        let before = state.crystal().clone();

        let req = request(
            System::Triclinic,
            BasisType::Primitive,
            LatticeParameters::new(5.0, 5.0, 5.0, 10.0, 170.0, 90.0),
        );
        let err = state.update(&req).unwrap_err();
        assert!(matches!(err, RelpError::DegenerateCell { .. }));
        assert_eq!(state.crystal(), &before);
    }

    #[test]
    fn test_system_switch_forces_primitive() {
        let mut state = default_state();
        state
            .update(&request(
                System::Cubic,
                BasisType::FaceCentered,
                LatticeParameters::cubic(5.0),
            ))
            .unwrap();
        assert_eq!(state.basis_type(), BasisType::FaceCentered);

        let outcome = state
            .update(&request(
                System::Hexagonal,
                BasisType::FaceCentered,
                LatticeParameters::cubic(5.0),
            ))
            .unwrap();

        match outcome {
            UpdateOutcome::Committed { params, basis, .. } => {
                assert_eq!(basis, BasisType::Primitive);
                assert_eq!(params.gamma, 120.0);
            }
            UpdateOutcome::RolledBack { reason, .. } => panic!("rolled back: {}", reason),
        }
        assert_eq!(state.system(), System::Hexagonal);
        assert_eq!(state.basis_type(), BasisType::Primitive);
        assert_eq!(state.snapshot().basis, BasisType::Primitive);
    }

    #[test]
    fn test_zero_zone_never_committed() {
        let mut state = default_state();
        let mut req = EditRequest::from_snapshot(state.snapshot());
        req.zone = Hkl::new(0, 0, 0);

        assert!(state.update(&req).unwrap().is_committed());
        assert_eq!(state.space().zone(), ZoneAxis::DEFAULT);
        assert_eq!(state.snapshot().zone, ZoneAxis::DEFAULT);
    }

    #[test]
    fn test_extreme_zone_axis_commits() {
        let mut state = CrystalState::init_with(
            LatticeParameters::cubic(5.0),
            ZoneEnumerator::new().with_search_radius(2),
        )
        .unwrap();
        let mut req = EditRequest::from_snapshot(state.snapshot());
        req.zone = Hkl::new(i32::MAX, 1, 0);

        assert!(state.update(&req).unwrap().is_committed());
        assert_eq!(state.space().zone().hkl(), Hkl::new(i32::MAX, 1, 0));
        assert_eq!(state.space().len(), 5);
        for p in state.space().points() {
            assert!(state.space().zone().contains(p.hkl));
        }
    }

    #[test]
    fn test_coupled_values_reported() {
        let mut state = default_state();
        let mut req = EditRequest::from_snapshot(state.snapshot());
        req.params.b = 6.5;
        req.edited = Field::B;

        match state.update(&req).unwrap() {
            UpdateOutcome::Committed { params, .. } => {
                assert_eq!(params, LatticeParameters::cubic(6.5));
            }
            UpdateOutcome::RolledBack { reason, .. } => panic!("rolled back: {}", reason),
        }
        assert_eq!(state.parameters(), &LatticeParameters::cubic(6.5));
    }

    proptest! {
        #[test]
        fn rollback_leaves_state_identical(
            a in 1.0f64..10.0,
            alpha in 1.0f64..179.0,
            beta in 1.0f64..179.0,
            gamma in 1.0f64..179.0,
        ) {
            // 三方编辑长度且角度不等时必然回滚
            prop_assume!(alpha != beta || beta != gamma);

            let mut state = default_state();
            let before = state.crystal().clone();
            let snapshot = *state.snapshot();

            let req = EditRequest {
                system: System::Rhombohedral,
                basis: BasisType::Primitive,
                params: LatticeParameters::new(a, a, a, alpha, beta, gamma),
                zone: Hkl::new(0, 0, 1),
                edited: Field::A,
            };
            let outcome = state.update(&req).unwrap();

            prop_assert!(!outcome.is_committed());
            prop_assert_eq!(state.crystal(), &before);
            prop_assert_eq!(state.snapshot(), &snapshot);
        }

        #[test]
        fn committed_points_obey_zone_law(
            h in -4i32..=4, k in -4i32..=4, l in -4i32..=4,
            basis_idx in 0usize..3,
        ) {
            prop_assume!(h != 0 || k != 0 || l != 0);

            let mut state = CrystalState::init_with(
                LatticeParameters::cubic(5.0),
                ZoneEnumerator::new().with_search_radius(6),
            ).unwrap();
            let mut req = EditRequest::from_snapshot(state.snapshot());
            req.basis = BasisType::ALL[basis_idx];
            req.zone = Hkl::new(h, k, l);

            prop_assert!(state.update(&req).unwrap().is_committed());
            let zone = state.space().zone().hkl();
            prop_assert_eq!(zone, Hkl::new(h, k, l));
            for p in state.space().points() {
                prop_assert_eq!(p.hkl.dot(zone), 0);
            }
        }
    }
}
