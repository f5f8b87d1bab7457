//! The minimal frame loop that light filtering plugs into.
//!
//! A renderer owns a [`RenderManager`], which holds the active [`LightFilter`], and one
//! or more [`ViewPort`]s, each with a camera, the scenes it shows, and the
//! [`SceneProcessor`]s that hook into its frames.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::{fmt, mem};

use crate::camera::Camera;
use crate::filter::{DefaultLightFilter, LightFilter};
use crate::light::LightList;
use crate::scene::Geometry;


/// What a [`SceneProcessor`] may look at during a frame.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    camera: &'a Camera,
    scenes: &'a [Rc<dyn Geometry>],
}

impl<'a> ViewContext<'a> {
    /// Constructs a context from its parts.
    #[inline]
    pub fn new(camera: &'a Camera, scenes: &'a [Rc<dyn Geometry>]) -> Self {
        Self { camera, scenes }
    }

    /// Returns the camera of the view port being rendered.
    #[inline]
    pub fn camera(&self) -> &'a Camera {
        self.camera
    }

    /// Returns the root of every scene attached to the view port.
    #[inline]
    pub fn scenes(&self) -> &'a [Rc<dyn Geometry>] {
        self.scenes
    }
}

impl fmt::Debug for ViewContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("camera", self.camera)
            .field("scenes", &self.scenes.len())
            .finish()
    }
}

/// Hooks into the frames of one [`ViewPort`].
///
/// [`RenderManager::render_view_port()`] initializes a processor on the first frame
/// after it is added, and [`RenderManager::remove_processor()`] cleans it up.
pub trait SceneProcessor: fmt::Debug {
    /// Prepares the processor, possibly reconfiguring `render_manager`.
    fn initialize(&mut self, render_manager: &mut RenderManager, view: &ViewContext<'_>);

    /// Returns whether [`initialize()`](Self::initialize) has been called more recently
    /// than [`cleanup()`](Self::cleanup).
    fn is_initialized(&self) -> bool;

    /// Called at the start of each frame with the time in seconds since the last one.
    #[inline]
    fn pre_frame(&mut self, tpf: f32) {
        _ = tpf;
    }

    /// Called once the objects to draw are known, before any of them is filtered.
    fn post_queue(&mut self, view: &ViewContext<'_>);

    /// Called after every queued object has been filtered.
    #[inline]
    fn post_frame(&mut self) {}

    /// Undoes whatever [`initialize()`](Self::initialize) did to `render_manager`.
    fn cleanup(&mut self, render_manager: &mut RenderManager);
}

// -------------------------------------------------------------------------------------------------

/// A camera, the scenes it shows, and the objects queued to be drawn this frame.
pub struct ViewPort {
    camera: Camera,
    scenes: Vec<Rc<dyn Geometry>>,
    queue: Vec<Rc<dyn Geometry>>,
    processors: Vec<Box<dyn SceneProcessor>>,
}

impl ViewPort {
    /// Constructs a view port with no scenes, queued objects, or processors.
    #[inline]
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            scenes: Vec::new(),
            queue: Vec::new(),
            processors: Vec::new(),
        }
    }

    /// Returns the camera.
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replaces the camera. Filtering picks up the change in the next frame.
    #[inline]
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Adds a scene root, whose world light list processors may inspect.
    #[inline]
    pub fn attach_scene(&mut self, scene: Rc<dyn Geometry>) {
        self.scenes.push(scene);
    }

    /// Returns the attached scene roots.
    #[inline]
    pub fn scenes(&self) -> &[Rc<dyn Geometry>] {
        &self.scenes
    }

    /// Queues an object to be drawn, and therefore light-filtered, in the next frame.
    #[inline]
    pub fn enqueue(&mut self, geometry: Rc<dyn Geometry>) {
        self.queue.push(geometry);
    }

    /// Returns the objects queued for the next frame.
    #[inline]
    pub fn queue(&self) -> &[Rc<dyn Geometry>] {
        &self.queue
    }

    /// Adds a processor. It is initialized at the start of the next frame.
    #[inline]
    pub fn add_processor(&mut self, processor: impl SceneProcessor + 'static) {
        self.processors.push(Box::new(processor));
    }

    /// Returns the processors in the order they run.
    #[inline]
    pub fn processors(&self) -> &[Box<dyn SceneProcessor>] {
        &self.processors
    }
}

impl fmt::Debug for ViewPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewPort")
            .field("camera", &self.camera)
            .field("scenes", &self.scenes.len())
            .field("queue", &self.queue.len())
            .field("processors", &self.processors)
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------

/// Owns the active [`LightFilter`] and runs frames of [`ViewPort`]s.
#[derive(Debug)]
pub struct RenderManager {
    light_filter: Box<dyn LightFilter>,
}

impl RenderManager {
    /// Constructs a render manager using the given light filter.
    #[inline]
    pub fn new(light_filter: Box<dyn LightFilter>) -> Self {
        Self { light_filter }
    }

    /// Returns the active light filter.
    #[inline]
    pub fn light_filter(&self) -> &dyn LightFilter {
        &*self.light_filter
    }

    /// Installs a different light filter, returning the one it replaces.
    #[inline]
    pub fn replace_light_filter(
        &mut self,
        light_filter: Box<dyn LightFilter>,
    ) -> Box<dyn LightFilter> {
        mem::replace(&mut self.light_filter, light_filter)
    }

    /// Runs one frame of `view_port`, returning the filtered light list of each object
    /// that was queued, in queue order. The queue is left empty.
    ///
    /// In order, this:
    /// 1. initializes processors that are not initialized,
    /// 2. calls [`SceneProcessor::pre_frame()`],
    /// 3. sets the filter's camera to the view port's,
    /// 4. calls [`SceneProcessor::post_queue()`],
    /// 5. filters the lights of every queued object,
    /// 6. calls [`SceneProcessor::post_frame()`].
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn render_view_port(&mut self, view_port: &mut ViewPort, tpf: f32) -> Vec<LightList> {
        // Processors need the rest of the view port, and us, while they run.
        let mut processors = mem::take(&mut view_port.processors);
        let view = ViewContext::new(&view_port.camera, &view_port.scenes);

        for processor in &mut processors {
            if !processor.is_initialized() {
                processor.initialize(self, &view);
            }
        }
        for processor in &mut processors {
            processor.pre_frame(tpf);
        }

        self.light_filter.set_camera(view.camera());

        for processor in &mut processors {
            processor.post_queue(&view);
        }

        let queue = mem::take(&mut view_port.queue);
        let lists = queue
            .iter()
            .map(|geometry| {
                let mut output = LightList::new();
                self.light_filter.filter_lights(&**geometry, &mut output);
                output
            })
            .collect();
        log::trace!("filtered lights of {} objects", queue.len());

        for processor in &mut processors {
            processor.post_frame();
        }

        view_port.processors = processors;
        lists
    }

    /// Removes the processor at `index` from `view_port`, cleaning it up if it was
    /// initialized.
    ///
    /// Panics if `index` is out of bounds.
    #[track_caller]
    #[allow(clippy::missing_inline_in_public_items)]
    pub fn remove_processor(
        &mut self,
        view_port: &mut ViewPort,
        index: usize,
    ) -> Box<dyn SceneProcessor> {
        let mut processor = view_port.processors.remove(index);
        if processor.is_initialized() {
            processor.cleanup(self);
        }
        processor
    }
}

/// Uses a [`DefaultLightFilter`].
impl Default for RenderManager {
    #[inline]
    fn default() -> Self {
        Self::new(Box::new(DefaultLightFilter::new()))
    }
}
