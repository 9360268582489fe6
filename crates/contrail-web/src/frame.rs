//! The frame driver: one tick per display refresh, scheduled through
//! requestAnimationFrame. Owns the live [`RenderTransform`]; every other
//! component only produces targets for it.

use crate::hud::Hud;
use crate::render;
use contrail_core::{
    target_pose, BeaconClip, ControlMode, GestureState, Keyframe, MotionBlender, RenderTransform,
    ScrollState, SECTION_COUNT,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub scroll: Rc<RefCell<ScrollState>>,
    pub gesture: Rc<RefCell<GestureState>>,
    pub hand_enabled: Rc<RefCell<bool>>,

    pub keyframes: [Keyframe; SECTION_COUNT],
    pub blender: MotionBlender,
    pub transform: RenderTransform,
    pub mode: ControlMode,

    pub canvas: web::HtmlCanvasElement,
    pub hud: Hud,
    pub gpu: Option<render::GpuState<'a>>,

    pub beacon: Option<BeaconClip>,
    pub clip_time: f32,
    pub start_instant: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let time_s = (now - self.start_instant).as_secs_f32();

        // model-animation update
        self.clip_time += dt_sec;

        let scroll = *self.scroll.borrow();
        let gesture = *self.gesture.borrow();
        let mode = ControlMode::next(*self.hand_enabled.borrow(), gesture.hand_present);
        if mode != self.mode {
            log::info!("[mode] {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }

        let scroll_target = target_pose(&scroll, &self.keyframes);
        self.blender
            .step(&mut self.transform, mode, &scroll_target, &gesture, time_s);

        self.hud.update(&scroll);

        let beacon = self
            .beacon
            .map(|b| b.intensity(self.clip_time))
            .unwrap_or(0.0);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = g.render(&self.transform, beacon) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    mesh: Option<&contrail_core::MeshAsset>,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, mesh).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
