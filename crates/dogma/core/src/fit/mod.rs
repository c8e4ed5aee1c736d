//! Arena of item instances for one simulation run.
//!
//! Instances are stored densely and addressed by [`InstanceId`]. Applied
//! modifiers reference their source by handle, so attaching a modifier never
//! requires rebuilding the owning instance.
mod instance;

pub use instance::{
    AppliedModifier, Attribute, DbuffTag, DroneState, Instance, ItemKind, ModuleState,
    RequiredSkills,
};

use crate::ids::{AttributeId, InstanceId};

/// Every participating instance of a loadout.
///
/// Arena order is the collection order: hull, pilot, each module followed by
/// its charge, drones, fighters, implants, skills. This is also the order of
/// the "all items in fit" domain.
#[derive(Clone, Debug, PartialEq)]
pub struct Fit {
    instances: Vec<Instance>,
    hull: InstanceId,
    pilot: InstanceId,
    modules: Vec<InstanceId>,
    drones: Vec<InstanceId>,
    fighters: Vec<InstanceId>,
    implants: Vec<InstanceId>,
    skills: Vec<InstanceId>,
}

impl Fit {
    /// Creates a fit holding only its hull and pilot.
    ///
    /// The instance ids stored in `hull` and `pilot` are overwritten with
    /// their arena handles.
    pub fn new(mut hull: Instance, mut pilot: Instance) -> Self {
        hull.id = InstanceId(0);
        pilot.id = InstanceId(1);
        Self {
            instances: vec![hull, pilot],
            hull: InstanceId(0),
            pilot: InstanceId(1),
            modules: Vec::new(),
            drones: Vec::new(),
            fighters: Vec::new(),
            implants: Vec::new(),
            skills: Vec::new(),
        }
    }

    fn push(&mut self, mut instance: Instance) -> InstanceId {
        let id = InstanceId(self.instances.len() as u32);
        instance.id = id;
        self.instances.push(instance);
        id
    }

    pub fn push_module(&mut self, instance: Instance) -> InstanceId {
        let id = self.push(instance);
        self.modules.push(id);
        id
    }

    /// Pushes a charge; its kind must already name its module.
    pub fn push_charge(&mut self, instance: Instance) -> InstanceId {
        self.push(instance)
    }

    pub fn push_drone(&mut self, instance: Instance) -> InstanceId {
        let id = self.push(instance);
        self.drones.push(id);
        id
    }

    pub fn push_fighter(&mut self, instance: Instance) -> InstanceId {
        let id = self.push(instance);
        self.fighters.push(id);
        id
    }

    pub fn push_implant(&mut self, instance: Instance) -> InstanceId {
        let id = self.push(instance);
        self.implants.push(id);
        id
    }

    pub fn push_skill(&mut self, instance: Instance) -> InstanceId {
        let id = self.push(instance);
        self.skills.push(id);
        id
    }

    #[inline]
    pub fn get(&self, id: InstanceId) -> Option<&Instance> {
        self.instances.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Instance> {
        self.instances.get_mut(id.index())
    }

    pub fn hull(&self) -> InstanceId {
        self.hull
    }

    pub fn pilot(&self) -> InstanceId {
        self.pilot
    }

    pub fn modules(&self) -> &[InstanceId] {
        &self.modules
    }

    pub fn drones(&self) -> &[InstanceId] {
        &self.drones
    }

    pub fn fighters(&self) -> &[InstanceId] {
        &self.fighters
    }

    pub fn implants(&self) -> &[InstanceId] {
        &self.implants
    }

    pub fn skills(&self) -> &[InstanceId] {
        &self.skills
    }

    /// All instances in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.instances.iter()
    }

    /// All handles in arena order.
    pub fn ids(&self) -> impl Iterator<Item = InstanceId> + '_ {
        (0..self.instances.len() as u32).map(InstanceId)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Base value of `attribute` on `id`, if declared.
    pub fn base_value(&self, id: InstanceId, attribute: AttributeId) -> Option<f64> {
        self.get(id)?.base_value(attribute)
    }
}
