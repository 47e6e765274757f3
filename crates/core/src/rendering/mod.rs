pub mod mask_overlay;
