export![camera, dirty, display, scene, viewport];
