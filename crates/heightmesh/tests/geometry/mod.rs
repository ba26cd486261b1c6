mod grid_input;
mod refinement;
mod scenarios;
mod solid_base;
