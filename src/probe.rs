export![cross, cubemap, hdr, image];
